use std::fmt;
use std::fmt::Formatter;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
pub struct Airline {
    pub code: String,
    pub name: String,
}

impl fmt::Display for Airline {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
