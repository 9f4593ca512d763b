use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Engine, EngineError, Trip, UserNewCmd};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "busfare_admin")]
#[command(about = "Admin utilities for BusFare (bootstrap users, inspect trips)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./busfare.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Trip(TripArgs),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct TripArgs {
    #[command(subcommand)]
    command: TripCommand,
}

#[derive(Subcommand, Debug)]
enum TripCommand {
    /// Print every trip of a user with its passengers' shares.
    List(TripListArgs),
    /// Split a trip again and store the shares.
    Recompute(TripRecomputeArgs),
}

#[derive(Args, Debug)]
struct TripListArgs {
    #[arg(long)]
    owner: String,
}

#[derive(Args, Debug)]
struct TripRecomputeArgs {
    #[arg(long)]
    owner: String,
    #[arg(long)]
    trip_id: Uuid,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let p1 = prompt_password("Password: ")?;
        if p1.is_empty() {
            execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print("Password must not be empty.\r\n")
            )?;
            continue;
        }

        let p2 = prompt_password("Confirm password: ")?;
        if p1 == p2 {
            return Ok(p1);
        }

        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("Passwords do not match. Try again.\r\n")
        )?;
    }

    Err("too many attempts".into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn print_trip(trip: &Trip) {
    let date = trip
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}  {}  {}  total {:.2}",
        trip.id, date, trip.destination, trip.total_cost
    );
    for passenger in &trip.passengers {
        println!(
            "    {:<20} surcharge {:>8.2}  share {:>8.2}",
            passenger.name,
            passenger.surcharge,
            passenger.share_amount()
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let password = prompt_password_twice()?;

            match engine
                .register_user(UserNewCmd {
                    name: args.name,
                    email: args.email,
                    password,
                })
                .await
            {
                Ok(user) => println!("created user: {}", user.email),
                Err(EngineError::ExistingKey(email)) => {
                    eprintln!("user already exists: {email}");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Trip(TripArgs {
            command: TripCommand::List(args),
        }) => {
            let owner = find_owner(&engine, &args.owner).await?;
            let trips = engine.list_trips(&owner).await?;
            if trips.is_empty() {
                println!("no trips for {owner}");
            }
            for trip in &trips {
                print_trip(trip);
            }
        }
        Command::Trip(TripArgs {
            command: TripCommand::Recompute(args),
        }) => {
            let owner = find_owner(&engine, &args.owner).await?;
            match engine.recompute_split(args.trip_id, &owner).await {
                Ok(trip) => print_trip(&trip),
                Err(EngineError::KeyNotFound(_)) => {
                    eprintln!("trip not found: {}", args.trip_id);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}

/// Resolve `--owner` to the stored email, exiting when the user is unknown.
async fn find_owner(engine: &Engine, owner: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    match engine.user(owner).await {
        Ok(user) => Ok(user.email),
        Err(EngineError::KeyNotFound(_) | EngineError::InvalidName(_)) => {
            eprintln!("user not found: {owner}");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
