use timewise_core::time::{minute_of_day, parse_time_of_day};
use timewise_core::EditAction;

use super::Session;

pub fn run(value: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;
    let now = session.now();

    let minutes = match value.trim().to_lowercase().as_str() {
        "clear" | "none" => None,
        "now" => Some(minute_of_day(now)),
        other => Some(
            parse_time_of_day(other).ok_or_else(|| format!("invalid time of day: {value}"))?,
        ),
    };

    let outcome = session.planner.edit(&EditAction::SetStartAt { minutes }, now)?;
    session.save()?;
    match minutes {
        Some(m) => println!("{outcome}: {:02}:{:02}", m / 60, m % 60),
        None => println!("{outcome}: from now"),
    }
    Ok(())
}
