use anyhow::{Context, Result, anyhow};
use catalog::{Catalog, Event, PartyKind, Profile, Role, Viewer};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engagement::{FavoriteTracker, FileStore, KeyValueStore, MemoryStore, SessionContext};
use pipeline::{QueryContext, QueryFilters, SortStrategy, TabScope};
use service::{DirectoryOrchestrator, EngineConfig, Lookup, Page, Paged, RoleView};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// SLATE - Brand and talent directory
#[derive(Parser)]
#[command(name = "slate")]
#[command(about = "Browse the SLATE directory and events as any role", long_about = None)]
struct Cli {
    /// Path to the snapshot directory
    #[arg(short, long, default_value = "data/slate")]
    data_dir: PathBuf,

    /// JSON file holding favorites and the signed-in viewer
    #[arg(short, long, default_value = ".slate-store.json")]
    store: PathBuf,

    /// Optional JSON engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List brand or talent profiles
    Directory {
        /// "talent" or "brands"
        #[arg(long, default_value = "talent")]
        kind: String,

        /// Case-insensitive search over name, description and category
        #[arg(long, default_value = "")]
        search: String,

        #[arg(long, default_value = "All Categories")]
        category: String,

        /// "recent" or "popular"
        #[arg(long, default_value = "recent")]
        sort: String,

        /// Zero-based page number
        #[arg(long, default_value = "0")]
        page: usize,
    },

    /// List events
    Events {
        /// "upcoming", "past" or "my-events"
        #[arg(long, default_value = "upcoming")]
        tab: String,

        #[arg(long, default_value = "")]
        search: String,

        /// Event type, or "all"
        #[arg(long = "type", default_value = "all")]
        event_type: String,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        #[arg(long, default_value = "recent")]
        sort: String,

        #[arg(long, default_value = "0")]
        page: usize,

        /// Evaluate upcoming/past relative to this instant instead of now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Show one event
    Event { id: String },

    /// Show one profile
    Profile {
        /// "talent" or "brands"
        kind: String,
        id: String,
    },

    /// Show the most popular events
    Popular {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Toggle an event in your favorites
    Favorite { event_id: String },

    /// List your favorited events
    Favorites,

    /// List the categories offered for one side of the directory
    Categories {
        #[arg(long, default_value = "talent")]
        side: String,
    },

    /// Sign in as the first account with a role
    Login { role: String },

    /// Sign out
    Logout,

    /// Show the signed-in viewer
    Whoami,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path).context("Failed to load engine config")?,
        None => EngineConfig::default(),
    };

    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_dir(&cli.data_dir).context("Failed to load SLATE snapshot")?,
    );
    let (brands, talent, events, _) = catalog.counts();
    println!(
        "{} Loaded {} brands, {} talent, {} events in {:?}",
        "✓".green(),
        brands,
        talent,
        events,
        start.elapsed()
    );

    let orchestrator = DirectoryOrchestrator::new(catalog, config);
    let mut store = open_store(&cli.store);
    let viewer = SessionContext::new(&mut store).current_or_anonymous();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Directory {
            kind,
            search,
            category,
            sort,
            page,
        } => {
            let filters = QueryFilters::new()
                .with_search(search)
                .with_category(&category);
            handle_directory(&orchestrator, &viewer, &kind, &filters, &sort, page)?
        }
        Commands::Events {
            tab,
            search,
            event_type,
            from,
            to,
            sort,
            page,
            at,
        } => {
            let filters = QueryFilters::new()
                .with_scope(tab.as_str())
                .with_search(search)
                .with_event_type(&event_type)
                .with_dates(from, to);
            let now = at.unwrap_or_else(Utc::now);
            handle_events(&orchestrator, &viewer, filters, &sort, page, now)
        }
        Commands::Event { id } => handle_event(&orchestrator, &viewer, &id)?,
        Commands::Profile { kind, id } => handle_profile(&orchestrator, &viewer, &kind, &id)?,
        Commands::Popular { limit } => handle_popular(&orchestrator, &viewer, limit),
        Commands::Favorite { event_id } => {
            handle_favorite(&orchestrator, store.as_mut(), &viewer, &event_id)?
        }
        Commands::Favorites => handle_favorites(&orchestrator, store.as_mut(), &viewer),
        Commands::Categories { side } => handle_categories(&orchestrator, &side)?,
        Commands::Login { role } => handle_login(&orchestrator, store.as_mut(), &role)?,
        Commands::Logout => handle_logout(store.as_mut()),
        Commands::Whoami => handle_whoami(&orchestrator, &viewer),
    }

    Ok(())
}

/// Open the file store, falling back to memory when it cannot be read
fn open_store(path: &Path) -> Box<dyn KeyValueStore> {
    match FileStore::open(path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(
                "Cannot open store {}, state will not persist: {}",
                path.display(),
                e
            );
            Box::new(MemoryStore::new())
        }
    }
}

fn parse_kind(kind: &str) -> Result<PartyKind> {
    kind.parse()
        .map_err(|_| anyhow!("Unknown directory {:?}, expected \"talent\" or \"brands\"", kind))
}

/// Handle the 'directory' command
fn handle_directory(
    orchestrator: &DirectoryOrchestrator,
    viewer: &Viewer,
    kind: &str,
    filters: &QueryFilters,
    sort: &str,
    page: usize,
) -> Result<()> {
    let kind = parse_kind(kind)?;
    let view = orchestrator.role_view(viewer);
    println!("{}", view.directory_heading.bold().blue());

    if !view.offers_directory(kind) {
        println!(
            "{} The {} directory is not available to {} viewers",
            "!".yellow(),
            kind,
            viewer.role
        );
        return Ok(());
    }

    let context = QueryContext::new(viewer, Utc::now());
    let page_size = orchestrator.config().page_size;
    let profiles = orchestrator.directory(
        kind,
        &context,
        filters,
        SortStrategy::from(sort),
        Page::nth(page, page_size),
    );

    for (i, profile) in profiles.items.iter().enumerate() {
        print_profile_row(profiles.offset + i + 1, profile);
    }
    print_footer(&profiles, "profiles");
    Ok(())
}

/// Handle the 'events' command
fn handle_events(
    orchestrator: &DirectoryOrchestrator,
    viewer: &Viewer,
    mut filters: QueryFilters,
    sort: &str,
    page: usize,
    now: DateTime<Utc>,
) {
    let view = orchestrator.role_view(viewer);
    println!("{}", "Events".bold().blue());
    println!("{}", view.events_heading.dimmed());

    if !view.offers_event_tab(filters.scope) {
        let fallback = view.event_tabs.first().copied().unwrap_or(TabScope::Upcoming);
        println!(
            "{} The {} tab is not available to {} viewers, showing {}",
            "!".yellow(),
            filters.scope.as_str(),
            viewer.role,
            fallback.as_str()
        );
        filters.scope = fallback;
    }

    let context = QueryContext::new(viewer, now);
    let page_size = orchestrator.config().page_size;
    let events = orchestrator.events(
        &context,
        &filters,
        SortStrategy::from(sort),
        Page::nth(page, page_size),
    );

    for (i, event) in events.items.iter().enumerate() {
        print_event_row(events.offset + i + 1, event);
    }
    print_footer(&events, "events");
}

/// Handle the 'event' command
fn handle_event(orchestrator: &DirectoryOrchestrator, viewer: &Viewer, id: &str) -> Result<()> {
    let event = match orchestrator.event_detail(viewer, id) {
        Lookup::Found(event) => event,
        Lookup::NotFound => return Err(anyhow!("Event {} not found", id)),
        Lookup::Hidden => {
            println!("{} Event {} is not visible to you", "!".yellow(), id);
            return Ok(());
        }
    };

    println!("{}", event.title.bold().blue());
    println!("{}Type: {}", "• ".green(), event.event_type);
    println!("{}Date: {}", "• ".green(), event.date.format("%B %-d, %Y %H:%M UTC"));
    println!("{}Location: {}", "• ".green(), event.location);
    println!("{}Hosted by: {} ({})", "• ".green(), event.host.name, event.host.kind);
    println!(
        "{}Applications: {}  RSVPs: {}",
        "• ".cyan(),
        event.applications.len(),
        event.rsvps.len()
    );
    if !event.description.is_empty() {
        println!("\n{}", event.description);
    }
    Ok(())
}

/// Handle the 'profile' command
fn handle_profile(
    orchestrator: &DirectoryOrchestrator,
    viewer: &Viewer,
    kind: &str,
    id: &str,
) -> Result<()> {
    let kind = parse_kind(kind)?;
    let profile = match orchestrator.profile_detail(viewer, kind, id) {
        Lookup::Found(profile) => profile,
        Lookup::NotFound => return Err(anyhow!("{} profile {} not found", kind, id)),
        Lookup::Hidden => {
            println!("{} Profile {} is not visible to you", "!".yellow(), id);
            return Ok(());
        }
    };

    let premium = if profile.premium { " ★".yellow().to_string() } else { String::new() };
    println!("{}{}", profile.name.bold().blue(), premium);
    println!("{}Category: {}", "• ".green(), profile.category);
    println!("{}Location: {}", "• ".green(), profile.location);
    if !profile.partners.is_empty() {
        let label = match kind {
            PartyKind::Brand => "Talent partners",
            PartyKind::Talent => "Brand partners",
        };
        println!("{}{}: {}", "• ".cyan(), label, profile.partners.join(", "));
    }
    if !profile.past_events.is_empty() {
        println!("{}Past events: {}", "• ".cyan(), profile.past_events.join(", "));
    }
    if !profile.description.is_empty() {
        println!("\n{}", profile.description);
    }
    Ok(())
}

/// Handle the 'popular' command
fn handle_popular(orchestrator: &DirectoryOrchestrator, viewer: &Viewer, limit: Option<usize>) {
    let context = QueryContext::new(viewer, Utc::now());
    let events = orchestrator.popular_events(&context, limit);

    println!("{}", "Popular Events".bold().blue());
    for (i, event) in events.iter().enumerate() {
        print_event_row(i + 1, event);
    }
}

/// Handle the 'favorite' command
fn handle_favorite(
    orchestrator: &DirectoryOrchestrator,
    store: &mut dyn KeyValueStore,
    viewer: &Viewer,
    event_id: &str,
) -> Result<()> {
    match orchestrator.event_detail(viewer, event_id) {
        Lookup::Found(_) => {}
        Lookup::NotFound => return Err(anyhow!("Event {} not found", event_id)),
        Lookup::Hidden => {
            println!("{} Event {} is not visible to you", "!".yellow(), event_id);
            return Ok(());
        }
    }

    let mut tracker = FavoriteTracker::new(store).with_hint_scope(orchestrator.config().hint_scope);
    let outcome = tracker.toggle_favorite(viewer, event_id);

    let mark = if outcome.favorited { "★".yellow() } else { "☆".normal() };
    println!("{} {}", mark, outcome.notice().bold());
    println!("  {}", outcome.detail().dimmed());
    if outcome.hint_revealed {
        println!(
            "  {}",
            "Tip: favorite an event to add it to your watchlist (`slate favorites`)".italic()
        );
    }
    Ok(())
}

/// Handle the 'favorites' command
fn handle_favorites(
    orchestrator: &DirectoryOrchestrator,
    store: &mut dyn KeyValueStore,
    viewer: &Viewer,
) {
    let favorites = FavoriteTracker::new(store).favorites(viewer);
    let events = orchestrator.watchlist(viewer, &favorites);

    println!("{}", "Event Watchlist".bold().blue());
    if events.is_empty() {
        println!("{}", "No favorited events yet".dimmed());
    }
    for (i, event) in events.iter().enumerate() {
        print_event_row(i + 1, event);
    }
}

/// Handle the 'categories' command
fn handle_categories(orchestrator: &DirectoryOrchestrator, side: &str) -> Result<()> {
    let side = parse_kind(side)?;
    println!("{}", format!("{} categories", side).bold().blue());
    for label in orchestrator.evaluator().universe().picker(side) {
        println!("  - {}", label);
    }
    Ok(())
}

/// Handle the 'login' command
fn handle_login(
    orchestrator: &DirectoryOrchestrator,
    store: &mut dyn KeyValueStore,
    role: &str,
) -> Result<()> {
    let role: Role = role
        .parse()
        .map_err(|_| anyhow!("Unknown role {:?}, expected admin, brand, talent or public", role))?;

    match SessionContext::new(store).login(orchestrator.catalog(), role) {
        Some(viewer) => {
            println!("{} Signed in as {} ({})", "✓".green(), viewer.display_name(), viewer.role);
            print_role_view(RoleView::for_role(viewer.role));
        }
        None => println!("{} No {} account exists", "!".yellow(), role),
    }
    Ok(())
}

/// Handle the 'logout' command
fn handle_logout(store: &mut dyn KeyValueStore) {
    match SessionContext::new(store).logout() {
        Some(viewer) => println!("{} Signed out {}", "✓".green(), viewer.display_name()),
        None => println!("Nobody is signed in"),
    }
}

/// Handle the 'whoami' command
fn handle_whoami(orchestrator: &DirectoryOrchestrator, viewer: &Viewer) {
    if viewer.id.is_empty() {
        println!("Browsing as a {} visitor", viewer.role);
    } else {
        println!(
            "{}",
            format!("{} ({})", viewer.display_name(), viewer.role).bold().blue()
        );
        if let Some(email) = &viewer.email {
            println!("{}Email: {}", "• ".green(), email);
        }
        if let Some(profile) = orchestrator.own_profile(viewer) {
            println!("{}Profile: {} [{}]", "• ".green(), profile.name, profile.id);
        }
    }
    print_role_view(orchestrator.role_view(viewer));
}

fn print_role_view(view: &RoleView) {
    let tabs = |names: Vec<&str>| names.join(", ");
    println!(
        "{}Directory: {}",
        "• ".cyan(),
        tabs(view.directory_tabs.iter().map(|k| k.as_str()).collect())
    );
    println!(
        "{}Event tabs: {}",
        "• ".cyan(),
        tabs(view.event_tabs.iter().map(|s| s.as_str()).collect())
    );
    match view.dashboard {
        Some(dashboard) => println!("{}Dashboard: {:?}", "• ".cyan(), dashboard),
        None => println!("{}Dashboard: none", "• ".cyan()),
    }
    if view.can_manage {
        println!("{}Can manage all records", "• ".cyan());
    }
}

fn print_profile_row(rank: usize, profile: &Profile) {
    let premium = if profile.premium { " ★" } else { "" };
    println!(
        "{}. {}{} [{}] {} - {} partners",
        rank.to_string().green(),
        profile.name.bold(),
        premium.yellow(),
        profile.id,
        profile.category,
        profile.partners.len()
    );
}

fn print_event_row(rank: usize, event: &Event) {
    println!(
        "{}. {} [{}] {} - {} ({}) - hosted by {} - {} interested",
        rank.to_string().green(),
        event.title.bold(),
        event.id,
        event.date.format("%Y-%m-%d"),
        event.event_type,
        event.location,
        event.host.name,
        event.applications.len() + event.rsvps.len()
    );
}

fn print_footer<T>(page: &Paged<T>, noun: &str) {
    let shown = page.items.len();
    if shown == 0 {
        println!("{}", format!("No {} found", noun).dimmed());
        return;
    }
    let first = page.offset + 1;
    let last = page.offset + shown;
    let more = if page.has_more() { " (more with --page)" } else { "" };
    println!(
        "{}",
        format!("Showing {}-{} of {} {}{}", first, last, page.total, noun, more).dimmed()
    );
}
