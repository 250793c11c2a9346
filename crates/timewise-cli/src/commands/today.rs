use timewise_core::time::{format_day_label, format_time_hm, human_duration};
use timewise_core::{Event, EventStatus};

use super::Session;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let timeline = session.planner.timeline();
    if json {
        println!("{}", serde_json::to_string_pretty(timeline)?);
    } else {
        println!("{}", format_day_label(session.now().date()));
        print_events(timeline);
    }
    Ok(())
}

/// One line per event: time range, length, title, flags and id.
pub fn print_events(events: &[Event]) {
    if events.is_empty() {
        println!("  (nothing planned)");
        return;
    }
    for event in events {
        let mut flags = Vec::new();
        if event.pinned {
            flags.push("pinned".to_string());
        }
        if event.status != EventStatus::Scheduled {
            flags.push(event.status.to_string());
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!(
            "  {:>8} - {:<8} {:>6}  {}{}  ({})",
            format_time_hm(event.start),
            format_time_hm(event.end),
            human_duration(event.duration_minutes()),
            event.title,
            flags,
            event.id
        );
    }
}
