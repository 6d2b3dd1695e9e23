use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kultur_archive::model::display::{format_duration, sized_image_url};
use kultur_archive::model::{Contributor, EpisodeWithDetails, PerformanceWithDetails, Person, PersonRole};
use kultur_archive::query::DEFAULT_PERSON_LIMIT;
use kultur_archive::utils::config;
use kultur_archive::{Archive, ArchiveError, Page, SearchFilters, Session};

const THUMBNAIL_WIDTH: u32 = 320;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse the Kulturperler archive", long_about = None)]
struct Args {
    /// Archive image; defaults to KULTUR_DB_PATH, .env, or a nearby kulturperler.db
    #[arg(short, long, global = true)]
    db: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search broadcast episodes
    Episodes {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show one episode with its credits
    Episode { prf_id: String },
    /// Search performances
    Performances {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show one performance with credits and media
    Performance { id: i64 },
    /// Search persons by name
    Persons {
        query: String,
        #[arg(short, long, value_parser = parse_role)]
        role: Option<PersonRole>,
        #[arg(short = 'n', long, default_value_t = DEFAULT_PERSON_LIMIT)]
        limit: u32,
    },
    /// Show a person's credits, works and programmes about them
    Person { id: i64 },
    /// Show a work with its performances and links
    Work { id: i64 },
    /// List tags
    Tags,
    /// List playwrights by number of broadcast episodes
    Playwrights,
    /// Row counts and build information
    Stats,
}

#[derive(ClapArgs, Debug)]
struct FilterArgs {
    /// Free text matched against titles and descriptions
    #[arg(short, long)]
    query: Option<String>,
    #[arg(long)]
    year_from: Option<i32>,
    #[arg(long)]
    year_to: Option<i32>,
    #[arg(long)]
    playwright: Option<i64>,
    #[arg(long)]
    director: Option<i64>,
    #[arg(long)]
    actor: Option<i64>,
    /// May be repeated; matches any of the given tags
    #[arg(long = "tag")]
    tags: Vec<i64>,
    #[arg(short = 'n', long, default_value_t = kultur_archive::query::DEFAULT_PAGE_SIZE)]
    limit: u32,
    #[arg(long, default_value_t = 0)]
    offset: u32,
}

impl FilterArgs {
    fn split(self) -> (SearchFilters, Page) {
        let filters = SearchFilters {
            query: self.query,
            year_from: self.year_from,
            year_to: self.year_to,
            playwright_id: self.playwright,
            director_id: self.director,
            actor_id: self.actor,
            tag_ids: self.tags,
        };
        (filters, Page::new(self.limit, self.offset))
    }
}

fn parse_role(value: &str) -> std::result::Result<PersonRole, String> {
    PersonRole::ALL
        .into_iter()
        .find(|role| role.as_str() == value)
        .ok_or_else(|| {
            let known: Vec<&str> = PersonRole::ALL.iter().map(|r| r.as_str()).collect();
            format!("unknown role '{}', expected one of: {}", value, known.join(", "))
        })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kultur=warn,kultur_archive=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let db_path = config::resolve_db_path(args.db.as_deref())?;
    info!("DB: {:?}", db_path);

    let mut session = Session::new(&db_path);
    let archive = session
        .init()
        .with_context(|| format!("Failed to load archive from {:?}", db_path))?;

    run(archive, args.command, args.json)
}

fn run(archive: &Archive, command: Command, as_json: bool) -> Result<()> {
    debug!("Running {:?}", command);
    match command {
        Command::Episodes { filters } => {
            let (filters, page) = filters.split();
            let total = archive.count_episodes(&filters)?;
            let hits = archive.search_episodes(&filters, page)?;
            if as_json {
                return print_json(&json!({ "total": total, "offset": page.offset, "episodes": hits }));
            }
            println!("{} episode(s), showing {}:", total, hits.len());
            for hit in &hits {
                println!("  {}", episode_line(hit));
            }
        }
        Command::Episode { prf_id } => {
            let episode = archive
                .get_episode(&prf_id)?
                .ok_or_else(|| ArchiveError::not_found("Episode", &prf_id))?;
            let contributors = archive.get_episode_contributors(&prf_id)?;
            let tags = archive.get_episode_tags(&prf_id)?;
            if as_json {
                return print_json(&json!({
                    "episode": episode,
                    "contributors": contributors,
                    "tags": tags,
                }));
            }
            println!("{}", episode_line(&episode));
            if let Some(play) = &episode.play_title {
                println!("  Work: {}", play);
            }
            if let Some(description) = &episode.episode.description {
                println!("  {}", description);
            }
            if let Some(url) = &episode.episode.nrk_url {
                println!("  {}", url);
            }
            let image = sized_image_url(episode.episode.image_url.as_deref(), THUMBNAIL_WIDTH);
            if !image.is_empty() {
                println!("  Image: {}", image);
            }
            print_contributors(&contributors);
            if !tags.is_empty() {
                let names: Vec<&str> = tags.iter().map(|t| t.display_name.as_str()).collect();
                println!("  Tags: {}", names.join(", "));
            }
        }
        Command::Performances { filters } => {
            let (filters, page) = filters.split();
            let total = archive.count_performances(&filters)?;
            let hits = archive.search_performances(&filters, page)?;
            if as_json {
                return print_json(&json!({ "total": total, "offset": page.offset, "performances": hits }));
            }
            println!("{} performance(s), showing {}:", total, hits.len());
            for hit in &hits {
                println!("  {}", performance_line(hit));
            }
        }
        Command::Performance { id } => {
            let performance = archive
                .get_performance(id)?
                .ok_or_else(|| ArchiveError::not_found("Performance", id))?;
            let contributors = archive.get_performance_contributors(id)?;
            let media = archive.get_performance_media(id)?;
            let others = match performance.performance.work_id {
                Some(work_id) => archive.get_other_performances(work_id, id)?,
                None => Vec::new(),
            };
            if as_json {
                return print_json(&json!({
                    "performance": performance,
                    "contributors": contributors,
                    "media": media,
                    "other_performances": others,
                }));
            }
            println!("{}", performance_line(&performance));
            if let Some(venue) = &performance.performance.venue {
                println!("  Venue: {}", venue);
            }
            print_contributors(&contributors);
            println!("  Media:");
            for episode in &media {
                println!(
                    "    [{}] {} {}",
                    episode.prf_id,
                    episode.title,
                    format_duration(episode.duration_seconds)
                );
            }
            if !others.is_empty() {
                println!("  Other performances:");
                for other in &others {
                    println!("    {}", performance_line(other));
                }
            }
        }
        Command::Persons { query, role, limit } => {
            let persons = archive.search_persons(&query, role, limit)?;
            if as_json {
                return print_json(&persons);
            }
            if persons.is_empty() {
                println!("No persons found matching '{}'", query);
            } else {
                println!("Found {} person(s):", persons.len());
                for person in &persons {
                    println!("  {}", person_line(person));
                }
            }
        }
        Command::Person { id } => {
            let person = archive
                .get_person(id)?
                .ok_or_else(|| ArchiveError::not_found("Person", id))?;
            let roles = archive.get_person_roles(id)?;
            let mut credits = Vec::with_capacity(roles.len());
            for role in &roles {
                credits.push((*role, archive.get_person_performances(id, *role)?));
            }
            let works = archive.get_playwright_works(id)?;
            let about = archive.get_about_programs(id)?;
            let performances_about = archive.get_performances_about(id)?;
            let episodes_about = archive.get_episodes_about(id)?;
            if as_json {
                let credits: serde_json::Map<String, serde_json::Value> = credits
                    .iter()
                    .map(|(role, list)| -> Result<(String, serde_json::Value)> {
                        Ok((role.as_str().to_string(), serde_json::to_value(list)?))
                    })
                    .collect::<Result<_>>()?;
                return print_json(&json!({
                    "person": person,
                    "roles": roles,
                    "credits": credits,
                    "works": works,
                    "about_programs": about,
                    "performances_about": performances_about,
                    "episodes_about": episodes_about,
                }));
            }
            println!("{}", person_line(&person));
            if let Some(bio) = &person.bio {
                println!("  {}", bio);
            }
            if !works.is_empty() {
                println!("  {}:", PersonRole::Playwright.label());
                for work in &works {
                    let year = work.year_written.map(|y| format!(" ({})", y)).unwrap_or_default();
                    println!(
                        "    [{}] {}{} - {} performance(s)",
                        work.id, work.title, year, work.performance_count
                    );
                }
            }
            for (role, list) in &credits {
                println!("  {}:", role.label());
                for credit in list {
                    let year = credit.year.map(|y| format!(" ({})", y)).unwrap_or_default();
                    let character = credit
                        .character_name
                        .as_deref()
                        .map(|c| format!(" as {}", c))
                        .unwrap_or_default();
                    println!(
                        "    [{}] {}{}{}",
                        credit.performance_id,
                        credit.work_title.as_deref().unwrap_or("?"),
                        year,
                        character
                    );
                }
            }
            if !about.is_empty() || !performances_about.is_empty() || !episodes_about.is_empty() {
                println!("  About:");
                for performance in &performances_about {
                    println!("    {}", performance_line(performance));
                }
                for episode in &episodes_about {
                    println!("    {}", episode_line(episode));
                }
                for program in &about {
                    println!(
                        "    [{}] {}",
                        program.id,
                        program.title.as_deref().unwrap_or("?")
                    );
                }
            }
        }
        Command::Work { id } => {
            let work = archive
                .get_work(id)?
                .ok_or_else(|| ArchiveError::not_found("Work", id))?;
            let performances = archive.get_work_performances(id)?;
            let links = archive.get_work_external_links(id)?;
            if as_json {
                return print_json(&json!({
                    "work": work,
                    "performances": performances,
                    "external_links": links,
                }));
            }
            let by = work
                .playwright_name
                .as_deref()
                .map(|n| format!(" by {}", n))
                .unwrap_or_default();
            let year = work.work.year_written.map(|y| format!(" ({})", y)).unwrap_or_default();
            println!("[{}] {}{}{}", work.work.id, work.work.title, by, year);
            if let Some(synopsis) = &work.work.synopsis {
                println!("  {}", synopsis);
            }
            println!("  Performances:");
            for performance in &performances {
                println!("    {}", performance_line(performance));
            }
            for link in &links {
                println!("  {} <{}>", link.title.as_deref().unwrap_or(&link.url), link.url);
            }
        }
        Command::Tags => {
            let tags = archive.get_tags()?;
            if as_json {
                return print_json(&tags);
            }
            for tag in &tags {
                println!("  [{}] {} ({})", tag.id, tag.display_name, tag.name);
            }
        }
        Command::Playwrights => {
            let playwrights = archive.get_playwrights_with_counts()?;
            if as_json {
                return print_json(&playwrights);
            }
            for playwright in &playwrights {
                println!(
                    "  [{}] {} - {} episode(s), {} play(s)",
                    playwright.id, playwright.name, playwright.episode_count, playwright.play_count
                );
            }
        }
        Command::Stats => {
            let stats = archive.stats()?;
            let years = archive.get_year_range()?;
            let build_date = archive.metadata("build_date")?;
            if as_json {
                return print_json(&json!({
                    "stats": stats,
                    "year_range": years,
                    "build_date": build_date,
                    "fingerprint": archive.fingerprint(),
                }));
            }
            println!("Persons:      {}", stats.persons);
            println!("Works:        {}", stats.works);
            println!("Performances: {}", stats.performances);
            println!("Episodes:     {}", stats.episodes);
            println!("Tags:         {}", stats.tags);
            println!(
                "Credits:      {} episode, {} performance",
                stats.episode_credits, stats.performance_credits
            );
            if let Some(range) = years {
                println!("Years:        {}-{}", range.min, range.max);
            }
            if let Some(date) = build_date {
                println!("Built:        {}", date);
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn episode_line(hit: &EpisodeWithDetails) -> String {
    let episode = &hit.episode;
    let year = episode.year.map(|y| format!(" ({})", y)).unwrap_or_default();
    let duration = match format_duration(episode.duration_seconds) {
        d if d.is_empty() => d,
        d => format!(" [{}]", d),
    };
    let director = hit
        .director_name
        .as_deref()
        .map(|d| format!(", dir. {}", d))
        .unwrap_or_default();
    format!("[{}] {}{}{}{}", episode.prf_id, episode.title, year, duration, director)
}

fn performance_line(hit: &PerformanceWithDetails) -> String {
    let year = hit.performance.year.map(|y| format!(" ({})", y)).unwrap_or_default();
    let playwright = hit
        .playwright_name
        .as_deref()
        .map(|p| format!(" by {}", p))
        .unwrap_or_default();
    let director = hit
        .director_name
        .as_deref()
        .map(|d| format!(", dir. {}", d))
        .unwrap_or_default();
    format!(
        "[{}] {}{}{}{} - {} media",
        hit.performance.id,
        hit.display_title(),
        playwright,
        year,
        director,
        hit.media_count
    )
}

fn person_line(person: &Person) -> String {
    let lifespan = person.lifespan();
    if lifespan.is_empty() {
        format!("[{}] {}", person.id, person.name)
    } else {
        format!("[{}] {} {}", person.id, person.name, lifespan)
    }
}

fn print_contributors(contributors: &[Contributor]) {
    for contributor in contributors {
        let role = contributor.role.map(PersonRole::noun).unwrap_or("");
        let character = contributor
            .character_name
            .as_deref()
            .map(|c| format!(" ({})", c))
            .unwrap_or_default();
        println!("  {}: {}{}", role, contributor.person_name, character);
    }
}
