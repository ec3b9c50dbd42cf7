//! Command-line shell: one subcommand per user action of the dashboard and
//! management views. Results go to stdout as JSON, notifications to stderr.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tokio::sync::broadcast::{error::TryRecvError, Receiver};

use crate::{
    dashboard::commands as dashboard_commands,
    manage::commands::{self as manage_commands, LabFields, RoomFields},
    models::{BookingId, BookingInput, LabId, RoomId},
    notify::{Notification, NotificationLevel},
    session::commands as session_commands,
    AppState,
};

#[derive(Parser, Debug)]
#[command(name = "labdesk")]
#[command(about = "Manage laboratories, rooms and bookings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "LABDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LABDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Totals and laboratory cards
    Dashboard,
    /// Laboratory management
    Labs {
        #[command(subcommand)]
        action: LabAction,
    },
    /// Room management within a laboratory
    Rooms {
        #[command(subcommand)]
        action: RoomAction,
    },
    /// Bookings, passed through to the backend as JSON
    Bookings {
        #[command(subcommand)]
        action: BookingAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum LabAction {
    List,
    Show { id: LabId },
    Create(LabArgs),
    Update {
        id: LabId,
        #[command(flatten)]
        fields: LabArgs,
    },
    Delete { id: LabId },
}

#[derive(Args, Debug)]
pub struct LabArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    capacity: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum RoomAction {
    List {
        /// Only rooms of this laboratory
        #[arg(long)]
        lab: Option<LabId>,
    },
    Create {
        #[arg(long)]
        lab: LabId,
        #[command(flatten)]
        fields: RoomArgs,
    },
    Update {
        id: RoomId,
        #[arg(long)]
        lab: LabId,
        #[command(flatten)]
        fields: RoomArgs,
    },
    Delete {
        id: RoomId,
        #[arg(long)]
        lab: LabId,
    },
}

#[derive(Args, Debug)]
pub struct RoomArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    capacity: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum BookingAction {
    List {
        #[arg(long)]
        room: Option<RoomId>,
    },
    Create {
        /// Booking body as a JSON object
        #[arg(long)]
        data: String,
    },
    Update {
        id: BookingId,
        #[arg(long)]
        data: String,
    },
    Delete { id: BookingId },
}

impl Command {
    fn requires_session(&self) -> bool {
        !matches!(
            self,
            Command::Register { .. } | Command::Login { .. } | Command::Logout
        )
    }
}

impl From<LabArgs> for LabFields {
    fn from(args: LabArgs) -> Self {
        Self {
            name: args.name,
            location: args.location,
            capacity: args.capacity,
            description: args.description,
        }
    }
}

impl From<RoomArgs> for RoomFields {
    fn from(args: RoomArgs) -> Self {
        Self {
            name: args.name,
            capacity: args.capacity,
            description: args.description,
        }
    }
}

pub async fn dispatch(state: &AppState, command: Command) -> Result<()> {
    let mut notifications = state.notifier.subscribe();

    if command.requires_session() && !state.bootstrap().await {
        bail!("not signed in; run `labdesk login` first");
    }

    let outcome = execute(state, command).await;
    print_notifications(&mut notifications);
    outcome.map_err(|message| anyhow!(message))
}

async fn execute(state: &AppState, command: Command) -> Result<(), String> {
    match command {
        Command::Register {
            name,
            email,
            password,
        } => print_json(&session_commands::register(state, &name, &email, &password).await?),
        Command::Login { email, password } => {
            print_json(&session_commands::login(state, &email, &password).await?)
        }
        Command::Logout => session_commands::logout(state).await,
        Command::Whoami => print_json(&session_commands::get_session(state).await?),
        Command::Dashboard => print_json(&dashboard_commands::get_dashboard(state).await?),
        Command::Labs { action } => match action {
            LabAction::List => print_json(&manage_commands::get_labs(state).await?),
            LabAction::Show { id } => print_json(&manage_commands::get_lab(state, id).await?),
            LabAction::Create(fields) => {
                print_json(&manage_commands::create_lab(state, fields.into()).await?)
            }
            LabAction::Update { id, fields } => {
                print_json(&manage_commands::update_lab(state, id, fields.into()).await?)
            }
            LabAction::Delete { id } => manage_commands::delete_lab(state, id).await,
        },
        Command::Rooms { action } => match action {
            RoomAction::List { lab } => print_json(&manage_commands::get_rooms(state, lab).await?),
            RoomAction::Create { lab, fields } => {
                print_json(&manage_commands::create_room(state, lab, fields.into()).await?)
            }
            RoomAction::Update { id, lab, fields } => print_json(
                &manage_commands::update_room(state, lab, id, fields.into()).await?,
            ),
            RoomAction::Delete { id, lab } => manage_commands::delete_room(state, lab, id).await,
        },
        Command::Bookings { action } => match action {
            BookingAction::List { room } => {
                print_json(&dashboard_commands::list_bookings(state, room).await?)
            }
            BookingAction::Create { data } => {
                let body = parse_booking(&data)?;
                print_json(&dashboard_commands::create_booking(state, body).await?)
            }
            BookingAction::Update { id, data } => {
                let body = parse_booking(&data)?;
                print_json(&dashboard_commands::update_booking(state, id, body).await?)
            }
            BookingAction::Delete { id } => dashboard_commands::delete_booking(state, id).await,
        },
    }
}

fn parse_booking(raw: &str) -> Result<BookingInput, String> {
    serde_json::from_str(raw)
        .context("booking data must be a JSON object")
        .map_err(|e| format!("{e:#}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{rendered}");
    Ok(())
}

fn print_notifications(rx: &mut Receiver<Notification>) {
    loop {
        match rx.try_recv() {
            Ok(notification) => {
                let marker = match notification.level {
                    NotificationLevel::Success => "ok",
                    NotificationLevel::Error => "error",
                };
                eprintln!(
                    "[{marker}] {}: {}",
                    notification.title, notification.description
                );
            }
            Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}
