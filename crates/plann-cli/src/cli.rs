//! Command-line argument types and command handlers.
//!
//! Argument structs carry clap derives only; each handler turns them into a
//! sequence of discrete events on the core state machines and renders the
//! outcome as markdown:
//!
//! ```text
//! User Input → CLI Args (clap) → Wizard / Detail events → Renderer
//! ```

use std::{fmt::Write, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use log::debug;
use plann_core::{
    display::truncate_destination, ActiveTripStore, CalendarDay, CalendarView, CalendarWidget,
    DateRange, Invitation, OperationStatus, RangeText, Removal, SqliteTripStore, Startup, Submission,
    TripDetail, TripId, TripRecord, TripWhen, TripWizard, WizardOverlay,
};

use crate::{prompt, remote::HttpTripService, renderer::TerminalRenderer};

type Detail = TripDetail<Arc<HttpTripService>, Arc<HttpTripService>, SqliteTripStore>;

/// Fold calendar taps into a date range
///
/// Each day is applied in order, exactly as a tap on the calendar would be:
/// the first tap starts a range, the second closes it (swapping if earlier),
/// and a tap on a complete range starts over.
#[derive(Args)]
pub struct RangeArgs {
    /// Days to tap, as ISO dates (YYYY-MM-DD)
    #[arg(required = true)]
    pub days: Vec<CalendarDay>,
}

/// Create a trip and start following it
#[derive(Args)]
pub struct NewTripArgs {
    /// Where the trip goes
    #[arg(short, long)]
    pub destination: String,
    /// Calendar taps selecting the dates, as ISO dates
    #[arg(short, long = "tap", required = true)]
    pub taps: Vec<CalendarDay>,
    /// Email of a guest to invite (repeatable)
    #[arg(short, long = "guest")]
    pub guests: Vec<String>,
    /// Create without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Change destination or dates of the active trip
#[derive(Args)]
pub struct UpdateTripArgs {
    /// New destination
    #[arg(short, long)]
    pub destination: Option<String>,
    /// Calendar taps applied to the current dates, as ISO dates
    #[arg(short, long = "tap")]
    pub taps: Vec<CalendarDay>,
}

/// Confirm attendance to a trip you were invited to
#[derive(Args)]
pub struct ConfirmArgs {
    /// Trip from the invitation
    pub trip_id: String,
    /// Participant identifier from the invitation
    pub participant_id: String,
    /// Your full name
    #[arg(short, long)]
    pub name: String,
    /// Your email address
    #[arg(short, long)]
    pub email: String,
}

/// Stop following the active trip on this device
#[derive(Args)]
pub struct RemoveArgs {
    /// Remove without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Show the stored active trip id (offline)
    #[command(alias = "st")]
    Status,
    /// Plan a new trip
    #[command(alias = "n")]
    New(NewTripArgs),
    /// Open the active trip, or report that none is followed
    #[command(alias = "s")]
    Show,
    /// Update destination or dates of the active trip
    #[command(alias = "u")]
    Update(UpdateTripArgs),
    /// Confirm attendance from an invitation
    #[command(alias = "c")]
    Confirm(ConfirmArgs),
    /// Forget the active trip locally; the trip itself is kept
    #[command(alias = "rm")]
    Remove(RemoveArgs),
}

/// Prints the range produced by a sequence of taps.
pub fn show_range(args: &RangeArgs, renderer: &TerminalRenderer) -> Result<()> {
    let range = args
        .days
        .iter()
        .fold(DateRange::empty(), |range, day| range.select(*day));
    debug!("Folded {} tap(s) into {range:?}", args.days.len());

    renderer.render(&range_markdown(&range))?;
    renderer
        .calendar()
        .show(&CalendarView::new(&range, CalendarDay::today()));
    Ok(())
}

fn range_markdown(range: &DateRange) -> String {
    let bound = |day: Option<CalendarDay>| {
        day.map_or_else(|| "not selected".to_string(), |d| d.to_string())
    };
    let mut out = String::from("# Selected range\n\n");
    let _ = writeln!(out, "- **Starts:** {}", bound(range.starts_at));
    let _ = writeln!(out, "- **Ends:** {}", bound(range.ends_at));
    let _ = writeln!(out, "- **Text:** {}", RangeText(range));
    out.push('\n');
    out
}

fn trip_markdown(trip: &TripRecord) -> String {
    let mut out = format!("# {}\n\n", TripWhen(trip));
    let _ = writeln!(out, "- **ID:** {}", trip.id);
    let _ = writeln!(out, "- **Destination:** {}", trip.destination);
    let _ = writeln!(out, "- **Dates:** {} to {}", trip.starts_at, trip.ends_at);
    let _ = writeln!(
        out,
        "- **Confirmed:** {}",
        if trip.is_confirmed { "yes" } else { "no" }
    );
    out
}

/// Command handlers sharing one store, remote client and renderer.
pub struct Cli {
    store: SqliteTripStore,
    remote: Arc<HttpTripService>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(
        store: SqliteTripStore,
        remote: Arc<HttpTripService>,
        renderer: TerminalRenderer,
    ) -> Self {
        Self {
            store,
            remote,
            renderer,
        }
    }

    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        match command {
            TripCommands::Status => self.status().await,
            TripCommands::New(args) => self.new_trip(args).await,
            TripCommands::Show => self.show().await,
            TripCommands::Update(args) => self.update(args).await,
            TripCommands::Confirm(args) => self.confirm(args).await,
            TripCommands::Remove(args) => self.remove(&args).await,
        }
    }

    fn detail(&self, trip_id: TripId, participant_id: Option<String>) -> Detail {
        TripDetail::new(
            trip_id,
            participant_id,
            self.remote.clone(),
            self.remote.clone(),
            self.store.clone(),
        )
    }

    async fn active_trip(&self) -> Result<TripId> {
        self.store
            .get()
            .await
            .context("Failed to read the active trip")?
            .context("No active trip. Run `plann trip new` to plan one")
    }

    async fn status(&self) -> Result<()> {
        let markdown = match self.store.get().await.context("Failed to read the active trip")? {
            Some(id) => format!("Active trip: {id}\n"),
            None => "No active trip\n".to_string(),
        };
        self.renderer.render(&markdown)
    }

    async fn new_trip(&self, args: NewTripArgs) -> Result<()> {
        if !self.remote.has_owner() {
            bail!("Creating a trip needs --owner-name and --owner-email");
        }

        let mut wizard = TripWizard::new(self.remote.clone(), self.store.clone());
        if let Startup::Resume(trip) = wizard.start().await {
            bail!(
                "Already following trip {} ({}). Remove it first with `plann trip remove`",
                trip.id,
                truncate_destination(&trip.destination)
            );
        }

        wizard.set_destination(args.destination)?;
        wizard.open_overlay(WizardOverlay::Calendar)?;
        for day in args.taps {
            wizard.select_day(day)?;
        }
        self.renderer
            .calendar()
            .show(&wizard.calendar_view(CalendarDay::today()));
        wizard.close_overlay()?;
        wizard.advance()?;

        wizard.open_overlay(WizardOverlay::Guests)?;
        for guest in &args.guests {
            wizard.add_guest(guest)?;
        }
        wizard.close_overlay()?;
        wizard.advance()?;

        let draft = wizard.draft();
        let question = format!(
            "Create a trip to {} from {} with {} guest(s)?",
            draft.destination,
            RangeText(&draft.range),
            draft.guests.len()
        );
        let answer = prompt::confirm(&question, args.yes)?;

        let status = match wizard.confirm_submission(answer).await? {
            Submission::Cancelled => OperationStatus::failure("Trip creation cancelled"),
            Submission::Created {
                trip_id, warning, ..
            } => OperationStatus::success(format!("Created trip {trip_id}"))
                .with_warning(warning.as_ref()),
        };
        self.renderer.render(&status.to_string())
    }

    async fn show(&self) -> Result<()> {
        let mut wizard = TripWizard::new(self.remote.clone(), self.store.clone());
        match wizard.start().await {
            Startup::Resume(trip) => self.renderer.render(&trip_markdown(&trip)),
            Startup::ShowWizard => self
                .renderer
                .render("No active trip. Run `plann trip new` to plan one.\n"),
        }
    }

    async fn update(&self, args: UpdateTripArgs) -> Result<()> {
        let trip_id = self.active_trip().await?;
        let mut detail = self.detail(trip_id, None);
        detail.load().await.context("Failed to load the active trip")?;

        detail.open_update()?;
        if let Some(destination) = args.destination {
            detail.set_destination(destination)?;
        }
        if !args.taps.is_empty() {
            detail.open_calendar()?;
            for day in args.taps {
                detail.select_day(day)?;
            }
            self.renderer
                .calendar()
                .show(&detail.calendar_view(CalendarDay::today()));
            detail.confirm_dates()?;
        }
        detail.update_trip().await?;

        let status = OperationStatus::success(format!("Updated trip: {}", detail.when()));
        self.renderer.render(&status.to_string())
    }

    async fn confirm(&self, args: ConfirmArgs) -> Result<()> {
        let mut detail = self.detail(TripId::new(args.trip_id), Some(args.participant_id));
        let trip = detail.load().await.context("Failed to load the trip")?;
        self.renderer
            .render(&format!("You were invited to {}\n\n", Invitation(trip)))?;

        detail.set_guest_name(args.name)?;
        detail.set_guest_email(args.email)?;
        let completed = detail.confirm_attendance().await?;

        let status = OperationStatus::success(format!("Attendance confirmed: {}", detail.when()))
            .with_warning(completed.warning.as_ref());
        self.renderer.render(&status.to_string())
    }

    async fn remove(&self, args: &RemoveArgs) -> Result<()> {
        let Some(trip_id) = self
            .store
            .get()
            .await
            .context("Failed to read the active trip")?
        else {
            return self.renderer.render("No active trip\n");
        };

        let mut detail = self.detail(trip_id.clone(), None);
        detail.request_removal()?;
        let answer = prompt::confirm(&format!("Stop following trip {trip_id}?"), args.yes)?;

        let status = match detail.confirm_removal(answer).await? {
            Removal::Cancelled => OperationStatus::failure("Removal cancelled"),
            Removal::Removed(completed) => {
                OperationStatus::success(format!("Stopped following trip {trip_id}"))
                    .with_warning(completed.warning.as_ref())
            }
        };
        self.renderer.render(&status.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> CalendarDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_range_markdown_complete() {
        let range = DateRange::between(day("2026-11-05"), day("2026-11-10"));
        let markdown = range_markdown(&range);
        assert!(markdown.contains("- **Starts:** 2026-11-05"));
        assert!(markdown.contains("- **Ends:** 2026-11-10"));
        assert!(markdown.contains("- **Text:** 5 to 10 of November"));
    }

    #[test]
    fn test_range_markdown_start_only() {
        let range = DateRange::empty().select(day("2026-11-05"));
        let markdown = range_markdown(&range);
        assert!(markdown.contains("- **Ends:** not selected"));
        assert!(markdown.contains("- **Text:** 5 of November"));
    }

    #[test]
    fn test_trip_markdown() {
        let trip = TripRecord {
            id: TripId::new("b7d1"),
            destination: "Florianópolis".to_string(),
            starts_at: day("2026-11-28"),
            ends_at: day("2026-12-03"),
            is_confirmed: true,
        };
        let markdown = trip_markdown(&trip);
        assert!(markdown.starts_with("# Florianópo... from 28 of November to 3 of December.\n"));
        assert!(markdown.contains("- **ID:** b7d1"));
        assert!(markdown.contains("- **Confirmed:** yes"));
    }
}
