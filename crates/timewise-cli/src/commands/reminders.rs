use timewise_core::time::format_time_hm;

use super::Session;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let reminders = session.planner.reminders(session.now());
    if json {
        println!("{}", serde_json::to_string_pretty(&reminders)?);
        return Ok(());
    }
    if reminders.is_empty() {
        println!("no reminders in the next 24 hours");
    }
    for reminder in &reminders {
        println!(
            "{:>8}  {} ({})",
            format_time_hm(reminder.fire_at),
            reminder.heading(),
            reminder.body()
        );
    }
    Ok(())
}
