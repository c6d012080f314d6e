use anyhow::Result;
use chrono::{Local, Utc};
use clap::{Args, Parser, Subcommand};
use evently_client::format::{format_short_date, format_time, group_thousands};
use evently_client::{
    status_of, ClientError, EventDetail, EventForm, EventsApi, EventsCache, FormErrors, FormField,
    ListView, DEFAULT_BASE_URL, PAGE_SIZE,
};
use evently_core::Event;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evently", version, about = "Manage events from the terminal")]
struct Cli {
    /// Base URL of the events API, including the path prefix.
    #[arg(long, global = true, env = "EVENTLY_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List events with dashboard stats
    List {
        /// Filter by title, location or category
        #[arg(short, long, default_value = "")]
        search: String,
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show one event
    Show { id: String },
    /// Create an event
    Create(EventArgs),
    /// Update an event; only the given fields change
    Update {
        id: String,
        #[command(flatten)]
        fields: EventArgs,
    },
    /// Delete an event
    Delete { id: String },
}

/// Dates use the local `YYYY-MM-DDTHH:MM` form.
#[derive(Args, Default)]
struct EventArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    start: Option<String>,
    #[arg(long)]
    end: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Empty string clears the limit
    #[arg(long)]
    max_attendees: Option<String>,
    /// Empty string clears the image
    #[arg(long)]
    image_url: Option<String>,
    /// Mark the event as cancelled
    #[arg(long, conflicts_with = "active")]
    cancelled: bool,
    /// Mark the event as active again
    #[arg(long)]
    active: bool,
}

impl EventArgs {
    fn apply(self, form: &mut EventForm) {
        let fields = [
            (FormField::Title, self.title),
            (FormField::Description, self.description),
            (FormField::Location, self.location),
            (FormField::StartDate, self.start),
            (FormField::EndDate, self.end),
            (FormField::Category, self.category),
            (FormField::MaxAttendees, self.max_attendees),
            (FormField::ImageUrl, self.image_url),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                form.set(field, value);
            }
        }
        if self.cancelled {
            form.set_active(false);
        } else if self.active {
            form.set_active(true);
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cache = EventsCache::new(EventsApi::new(cli.base_url));

    if let Err(err) = run(cli.command, &cache).await {
        report(&err);
        std::process::exit(1);
    }
}

async fn run(command: Command, cache: &EventsCache) -> Result<()> {
    match command {
        Command::List { search, page } => list(cache, search, page).await,
        Command::Show { id } => show(cache, &id).await,
        Command::Create(args) => {
            let mut form = EventForm::create();
            args.apply(&mut form);
            let input = form.to_create_input(&Local).map_err(invalid_form)?;
            let created = cache.create(&input).await?;
            println!("Event created successfully (id {})", created.id);
            Ok(())
        }
        Command::Update { id, fields } => {
            let id = parse_id(&id)?;
            let current = cache.event(id).await?;
            let mut form = EventForm::edit(&current, &Local);
            fields.apply(&mut form);
            let input = form.to_update_input(&Local).map_err(invalid_form)?;
            let updated = cache.update(id, &input).await?;
            println!("Event updated successfully (id {})", updated.id);
            Ok(())
        }
        Command::Delete { id } => {
            let deleted = cache.delete(parse_id(&id)?).await?;
            println!("Event deleted successfully (id {})", deleted.id);
            Ok(())
        }
    }
}

async fn list(cache: &EventsCache, search: String, page: usize) -> Result<()> {
    let now = Utc::now();
    let mut view = ListView::new(PAGE_SIZE);
    view.set_events(cache.events().await?);
    view.set_search(search);
    view.set_page(page);

    let stats = view.stats(now);
    println!(
        "Total {}  Upcoming {}  Ongoing {}  Completed {}  Cancelled {}",
        stats.total, stats.upcoming, stats.ongoing, stats.completed, stats.cancelled
    );
    println!();

    let visible = view.visible();
    if visible.is_empty() {
        println!("No events found");
        return Ok(());
    }

    println!(
        "{:>5}  {:<32} {:<12} {:<8} {:<9} {:>8}",
        "ID", "TITLE", "DATE", "TIME", "STATUS", "TICKETS"
    );
    for event in visible {
        print_row(event, now);
    }
    println!();
    println!("Page {} of {}", view.page(), view.total_pages());
    Ok(())
}

fn print_row(event: &Event, now: chrono::DateTime<Utc>) {
    let start = event.start_date.with_timezone(&Local);
    let tickets = event
        .max_attendees
        .map(|n| group_thousands(n.max(0) as u64))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:>5}  {:<32} {:<12} {:<8} {:<9} {:>8}",
        event.id,
        truncate(&event.title, 32),
        format_short_date(&start),
        format_time(&start),
        status_of(event, now).label(),
        tickets
    );
}

async fn show(cache: &EventsCache, id: &str) -> Result<()> {
    let event = cache.event(parse_id(id)?).await?;
    let detail = EventDetail::new(&event, Utc::now(), &Local);

    println!("{} [{}]", event.title, detail.status);
    println!("{}", detail.date_range);
    println!("Starts {}", detail.start_long);
    println!("Location  {}", event.location);
    println!("Capacity  {}", detail.capacity);
    if let Some(url) = &event.image_url {
        println!("Image     {url}");
    }
    println!();
    println!("{}", event.description);
    println!();
    println!("Tickets sold       {}", group_thousands(detail.tickets_sold));
    println!("Estimated revenue  ${}", group_thousands(detail.estimated_revenue));
    println!("Unique attendees   {}", group_thousands(detail.unique_attendees));
    println!("Tags  {}", detail.tags.join(", "));
    Ok(())
}

/// Ids are checked by the server; this only rejects obvious typos early.
fn parse_id(id: &str) -> Result<i64> {
    evently_core::validation::parse_event_id(id)
        .map_err(|_| anyhow::anyhow!(evently_core::validation::INVALID_EVENT_ID))
}

fn invalid_form(errors: FormErrors) -> anyhow::Error {
    let lines: Vec<String> = errors
        .iter()
        .map(|(field, message)| format!("  {}: {}", field.wire_name(), message))
        .collect();
    anyhow::anyhow!("Invalid event:\n{}", lines.join("\n"))
}

fn report(err: &anyhow::Error) {
    eprintln!("error: {err}");
    if let Some(ClientError::Api { details, .. }) = err.downcast_ref::<ClientError>() {
        for detail in details {
            eprintln!("  {}: {}", detail.path, detail.message);
        }
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}
