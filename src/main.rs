use std::io::Write;
use crate::plan::FlightPlan;
use crate::reference::ReferenceData;
use crate::ticket::BoardingPass;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::settings::Style;

mod airline;
mod airport;
mod clock;
mod geo;
mod plan;
mod reference;
mod ticket;

#[derive(Parser)]
struct Args {
    /// Path to the airport/airline reference JSON file
    #[arg(short, long, value_name = "FILE", default_value = "data/reference.json")]
    reference: PathBuf,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

fn paginate(content: String) {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())
        .expect("Failed to spawn pager");

    let mut stdin = pager.stdin.take().expect("Failed to open stdin for pager");

    if let Err(e) = stdin.write_all(content.as_bytes()) {
        // Broken pipe is common if the user quits the pager early
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            eprintln!("Error writing to pager: {}", e);
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

fn print_plan(origin: &str, dest: &str, plan: &FlightPlan) {
    println!(
        "  {}  {} → {}  ({})",
        "Route".bold(),
        origin,
        dest,
        plan::format_distance(plan.distance_km)
    );
    println!(
        "  {}  {} {} local",
        "Departs".bold(),
        plan.departure_date_local,
        plan.departure_time_local
    );
    println!(
        "  {}  {} {} local ({})",
        "Arrives".bold(),
        plan.arrival_date_local,
        plan.arrival_time_local,
        plan.arrival_weekday
    );
    println!("  {}  {}", "Duration".bold(), plan.duration_formatted);
    println!(
        "  {}  {} (day change {:+})",
        "Time zones".bold(),
        plan.timezone_difference,
        plan.day_change
    );
}

fn cmd_plan(reference: &ReferenceData, parts: &[&str]) {
    if let [origin, dest, date, time] = parts {
        let origin = origin.to_uppercase();
        let dest = dest.to_uppercase();
        match plan::compute_flight_plan(reference, &origin, &dest, date, time) {
            Ok(plan) => print_plan(&origin, &dest, &plan),
            Err(e) => println!("{}", e.to_string().red()),
        }
    } else {
        println!("Usage: plan <ORIGIN> <DEST> <YYYY-MM-DD> <HH:MM>");
    }
}

fn cmd_ticket(reference: &ReferenceData, parts: &[&str]) {
    if parts.len() < 7 {
        println!("Usage: ticket <ORIGIN> <DEST> <YYYY-MM-DD> <HH:MM> <AIRLINE> <DIGITS> <NAME...>");
        return;
    }
    let (origin_code, dest_code) = (parts[0].to_uppercase(), parts[1].to_uppercase());
    let (date, time) = (parts[2], parts[3]);
    let airline_code = parts[4];
    let digits = parts[5];
    let passenger = parts[6..].join(" ");

    // The calculator itself allows equal codes; the wizard does not.
    if origin_code == dest_code {
        println!("{}", "Origin and destination must differ.".red());
        return;
    }
    if !ticket::valid_flight_digits(digits) {
        println!("{}", "Flight number must be 1 to 5 digits.".red());
        return;
    }
    let Some(airline) = reference.airline(airline_code) else {
        println!("{}", format!("Unknown airline code: {}", airline_code).red());
        return;
    };

    match plan::compute_flight_plan(reference, &origin_code, &dest_code, date, time) {
        Ok(plan) => {
            // Lookups can no longer fail once the plan computed
            let origin = reference.airport(&origin_code).unwrap().clone();
            let destination = reference.airport(&dest_code).unwrap().clone();
            let pass = BoardingPass::assemble(
                &mut rand::thread_rng(),
                passenger,
                airline.clone(),
                digits,
                origin,
                destination,
                plan,
            );
            println!("{}", pass);
        }
        Err(e) => println!("{}", e.to_string().red()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let reference = ReferenceData::load_from_file(args.reference.to_str().unwrap())?;
    println!(
        "Check-in desk open. {} airports, {} airlines loaded from {}",
        reference.airports().len(),
        reference.airlines().len(),
        args.reference.display()
    );

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: vec![
            "plan".to_string(),
            "ticket".to_string(),
            "airports".to_string(),
            "airlines".to_string(),
            "help".to_string(),
            "exit".to_string(),
        ],
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "plan" => cmd_plan(&reference, &parts[1..]),
                    "ticket" => cmd_ticket(&reference, &parts[1..]),
                    "airports" => {
                        let filter = parts.get(1).map(|s| s.to_lowercase());
                        let matching = reference.airports().into_iter()
                            .filter(|a| match &filter {
                                Some(text) => {
                                    a.code.to_lowercase().contains(text)
                                        || a.city.to_lowercase().contains(text)
                                        || a.country.to_lowercase().contains(text)
                                }
                                None => true,
                            })
                            .collect::<Vec<_>>();
                        if matching.is_empty() {
                            println!("No matching airports found.")
                        } else {
                            let mut table = tabled::Table::new(&matching);
                            table.with(Style::rounded());
                            table.with(tabled::settings::Alignment::left());
                            if matching.len() > 20 {
                                paginate(table.to_string());
                            } else {
                                println!("{}", table);
                            }
                        }
                    },
                    "airlines" => {
                        let mut table = tabled::Table::new(reference.airlines());
                        table.with(Style::rounded());
                        table.with(tabled::settings::Alignment::left());
                        println!("{}", table);
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  plan <org> <dst> <date> <time>   - Distance, duration and local times for a route");
                        println!("  ticket <org> <dst> <date> <time> <airline> <digits> <name...>");
                        println!("                                   - Render a printable boarding pass");
                        println!("  airports [text]                  - List airports, optionally filtered");
                        println!("  airlines                         - List airlines");
                        println!("  help / ?                         - Show this help menu");
                        println!("  exit / quit                      - Leave the check-in desk\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
