use anyhow::Context;
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use training_booking::{
    config::{Config, LogFormat},
    error::{BookingError, ErrorKind},
    models::{parse_seat_list, Attendee, Booking, BookingId},
    AppState,
};

const HELP: &str = "\
commands:
  login <email> <password>
  logout
  halls
  slots
  map <hall> <date> <slot>
  book <hall> <date> <slot> <A1,A2> <attendees-json>
  cancel <booking-id> <A1,A2>
  mine
  show <booking-id|url>
  link <booking-id>
  help
  quit";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("failed to load configuration")?;

    let filter = tracing_subscriber::EnvFilter::new(&config.app.rust_log);
    match config.app.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }

    info!("Starting Training Center Booking console");
    let mut app = AppState::new(config).context("failed to initialise booking app")?;

    // Ссылка на бронь открывается сразу, без логина
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--link" {
            let link = args.next().context("--link requires a URL")?;
            show(&app, &link);
        }
    }

    println!("Training Center Booking System. Type `help` for commands.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if let Err(e) = dispatch(&mut app, line) {
            report(&e);
        }
    }

    info!("Console closed");
    Ok(())
}

fn dispatch(app: &mut AppState, line: &str) -> Result<(), BookingError> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        "help" => println!("{}", HELP),
        "login" => {
            let mut parts = rest.split_whitespace();
            let email = parts.next().unwrap_or_default();
            let password = parts.next().unwrap_or_default();
            let user = app.login(email, password)?;
            println!("Logged in as {} <{}>", user.name, user.email);
        }
        "logout" => match app.logout() {
            Some(user) => println!("Goodbye, {}", user.name),
            None => println!("Nobody is logged in"),
        },
        "halls" => {
            for hall in app.catalog.halls() {
                println!(
                    "{}  {} ({})  {} seats, rows {}",
                    hall.id,
                    hall.name,
                    hall.hall_code,
                    hall.capacity,
                    hall.rows.join("")
                );
            }
        }
        "slots" => {
            for slot in app.catalog.time_slots() {
                println!("{}  {}  {}", slot.id, slot.window(), slot.label);
            }
        }
        "map" => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            let [hall_id, date, slot_id] = args[..] else {
                println!("usage: map <hall> <date> <slot>");
                return Ok(());
            };
            let date = parse_date(date)?;
            let occupancy = app.occupancy(hall_id, date, slot_id)?;
            let map = app.seat_map(hall_id, date, slot_id)?;
            let hall = app.catalog.require_hall(hall_id)?;
            print!("{}", map.render(hall));
            println!(
                "{}/{} seats occupied ({:.0}%), {} available [{:?}]",
                occupancy.occupied,
                occupancy.capacity,
                occupancy.percentage,
                occupancy.available,
                occupancy.level
            );
        }
        "book" => {
            let mut parts = rest.splitn(5, ' ');
            let (Some(hall_id), Some(date), Some(slot_id), Some(seats), Some(json)) =
                (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
            else {
                println!("usage: book <hall> <date> <slot> <A1,A2> <attendees-json>");
                return Ok(());
            };
            let date = parse_date(date)?;
            let seats = parse_seat_list(seats)?;
            let attendees: Vec<Attendee> = serde_json::from_str(json)
                .map_err(|e| BookingError::InvalidInput(format!("attendees json: {}", e)))?;
            let booking = app.book(hall_id, date, slot_id, seats, attendees)?;
            println!("Booking completed successfully! id {}", booking.id);
            println!("Share: {}", app.share_url(&booking.id)?);
        }
        "cancel" => {
            let Some((id, seats)) = rest.split_once(' ') else {
                println!("usage: cancel <booking-id> <A1,A2>");
                return Ok(());
            };
            let seats = parse_seat_list(seats)?;
            let outcome = app.cancel(&BookingId::from(id), &seats)?;
            println!("Cancelled: {:?}", outcome);
        }
        "mine" => {
            let bookings = app.my_bookings()?;
            if bookings.is_empty() {
                println!("No bookings yet");
            }
            for booking in bookings {
                print_booking(app, booking);
            }
        }
        "show" => show(app, rest),
        "link" => println!("{}", app.share_url(&BookingId::from(rest))?),
        other => println!("unknown command {:?}, try `help`", other),
    }
    Ok(())
}

fn show(app: &AppState, target: &str) {
    let found = if target.contains('=') {
        app.booking_from_link(target)
    } else {
        app.find_booking(&BookingId::from(target)).map(Some)
    };
    match found {
        Ok(Some(booking)) => print_booking(app, booking),
        Ok(None) => println!("link does not reference a booking"),
        Err(e) => report(&e),
    }
}

fn print_booking(app: &AppState, booking: &Booking) {
    let hall = app
        .catalog
        .hall(&booking.hall_id)
        .map(|h| h.name.as_str())
        .unwrap_or("unknown hall");
    let slot = app
        .catalog
        .time_slot(&booking.time_slot_id)
        .map(|t| t.label.as_str())
        .unwrap_or("unknown slot");
    println!("Booking {} | {} | {} | {}", booking.id, hall, booking.date, slot);
    for seat in &booking.seats {
        let Some(attendee) = booking.attendee_for(seat) else {
            continue;
        };
        println!(
            "  {:<4} {} ({}), {}, {}, {}",
            seat.as_str(),
            attendee.name,
            attendee.age,
            attendee.nationality,
            attendee.contact_number,
            attendee.email
        );
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidInput(format!("invalid date {:?}, expected YYYY-MM-DD", s)))
}

// Ошибки хранилища не фатальны: печатаем и продолжаем цикл
fn report(e: &BookingError) {
    if e.kind() == ErrorKind::Config {
        error!("{}", e);
    }
    println!("error: {}", e);
}
