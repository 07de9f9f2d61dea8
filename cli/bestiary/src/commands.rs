//! Command line surface. Thin plumbing only: every command maps onto one
//! SDK call and renders its result as text or JSON.

use anyhow::{bail, Result};
use bestiary_sdk::models::page::Page;
use bestiary_sdk::models::record::{display_name, SpeciesRecord};
use bestiary_sdk::models::search::SearchResults;
use bestiary_sdk::providers::species::SpeciesService;
use bestiary_sdk::{CatalogClient, CatalogConfig};
use bpaf::Bpaf;
use indoc::formatdoc;
use tracing::debug;

pub(crate) const DEFAULT_PAGE_SIZE: u32 = 20;

fn vec_len<T>(x: Vec<T>) -> usize {
    Vec::len(&x)
}

#[derive(Debug, Bpaf)]
#[bpaf(options, version)]
pub struct BestiaryArgs {
    /// Increase logging verbosity
    ///
    /// Invoke multiple times for increasing detail.
    #[bpaf(short('v'), long("verbose"), req_flag(()), many, map(vec_len))]
    pub verbose: usize,

    /// Base URL of the upstream species catalog
    #[bpaf(long("catalog-url"), env("BESTIARY_CATALOG_URL"), argument("URL"))]
    pub catalog_url: String,

    #[bpaf(external(commands))]
    pub command: Commands,
}

#[derive(Debug, Clone, Bpaf)]
pub enum Commands {
    /// Browse the species listing one page at a time
    #[bpaf(command)]
    List {
        /// Page to display (1-based)
        #[bpaf(long, argument("N"), fallback(1))]
        page: u32,
        /// Species per page
        #[bpaf(long, argument("N"), fallback(DEFAULT_PAGE_SIZE))]
        limit: u32,
        /// Display results as JSON
        #[bpaf(long)]
        json: bool,
    },

    /// Show one species in detail
    #[bpaf(command)]
    Show {
        /// Display the record as JSON
        #[bpaf(long)]
        json: bool,
        /// Species name
        #[bpaf(positional("name"))]
        name: String,
    },

    /// Search the catalog by exact name or substring
    #[bpaf(command)]
    Search {
        /// Display results as JSON
        #[bpaf(long)]
        json: bool,
        /// The term to search for
        #[bpaf(positional("term"))]
        term: String,
    },

    /// Browse the members of a group
    #[bpaf(command)]
    Group {
        /// Page to display (1-based)
        #[bpaf(long, argument("N"), fallback(1))]
        page: u32,
        /// Species per page
        #[bpaf(long, argument("N"), fallback(DEFAULT_PAGE_SIZE))]
        limit: u32,
        /// Display results as JSON
        #[bpaf(long)]
        json: bool,
        /// Group key
        #[bpaf(positional("key"))]
        key: String,
    },

    /// List all displayable groups
    #[bpaf(command)]
    Groups {
        /// Display results as JSON
        #[bpaf(long)]
        json: bool,
    },
}

impl BestiaryArgs {
    pub async fn handle(self) -> Result<()> {
        let config = CatalogConfig {
            user_agent: Some(format!("bestiary/{}", env!("CARGO_PKG_VERSION"))),
            ..CatalogConfig::new(self.catalog_url)
        };
        let service = SpeciesService::new(CatalogClient::new(config)?);

        match self.command {
            Commands::List { page, limit, json } => {
                debug!(page, limit, "listing species");
                let result = service.get_list_page(page, limit).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    return Ok(());
                }
                for item in &result.items {
                    match item {
                        Some(record) => println!("{}", summary_line(record)),
                        None => println!("(unavailable)"),
                    }
                }
                println!("{}", page_footer(&result, result.items.len()));
            },

            Commands::Show { name, json } => {
                debug!(%name, "fetching species details");
                let Some(record) = service.get_details(&name).await? else {
                    bail!("species '{name}' not found");
                };
                if json {
                    println!("{}", serde_json::to_string_pretty(&record)?);
                    return Ok(());
                }
                println!("{}", render_record(&record));
            },

            Commands::Search { term, json } => {
                debug!(%term, "searching the catalog");
                let results = service.search(&term).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&results)?);
                    return Ok(());
                }
                match results {
                    SearchResults::Exact(record) => println!("{}", render_record(&record)),
                    SearchResults::Matches { items, total_count } => {
                        if total_count == 0 {
                            bail!("no species matched '{term}'");
                        }
                        for record in &items {
                            println!("{}", summary_line(record));
                        }
                        println!("{} of {total_count} matches shown", items.len());
                    },
                }
            },

            Commands::Group {
                key,
                page,
                limit,
                json,
            } => {
                debug!(%key, page, limit, "listing group members");
                let Some(result) = service.get_group_page(&key, page, limit).await? else {
                    bail!("group '{key}' not found");
                };
                if json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    return Ok(());
                }
                for record in &result.items {
                    println!("{}", summary_line(record));
                }
                println!("{}", page_footer(&result, result.items.len()));
            },

            Commands::Groups { json } => {
                let groups = service.list_groups().await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&groups)?);
                    return Ok(());
                }
                for group in &groups {
                    println!("{:<16} {}", group.key, group.display_name);
                }
            },
        }
        Ok(())
    }
}

fn summary_line(record: &SpeciesRecord) -> String {
    let groups = record
        .groups
        .iter()
        .map(|key| display_name(key))
        .collect::<Vec<_>>()
        .join(", ");
    format!("#{:<5} {:<14} {groups}", record.id, record.display_name)
}

fn page_footer<T>(page: &Page<T>, shown: usize) -> String {
    format!(
        "page {} of {} ({shown} of {} shown)",
        page.current_page, page.total_pages, page.total_count
    )
}

fn render_record(record: &SpeciesRecord) -> String {
    let groups = record
        .groups
        .iter()
        .map(|key| display_name(key))
        .collect::<Vec<_>>()
        .join(", ");
    let stats = record
        .stats
        .iter()
        .map(|stat| format!("{} {}", stat.label, stat.value))
        .collect::<Vec<_>>()
        .join(", ");
    let abilities = record
        .abilities
        .iter()
        .map(|ability| {
            if ability.hidden {
                format!("{} (hidden)", ability.label)
            } else {
                ability.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    formatdoc! {"
        {display_name} (#{id}) {genus}
        groups:       {groups}
        height:       {height} m
        weight:       {weight} kg
        color:        {color}
        popularity:   {popularity}
        friendliness: {friendliness}
        stats:        {stats}
        abilities:    {abilities}

        {description}",
        display_name = record.display_name,
        id = record.id,
        genus = record.genus,
        height = record.height_m,
        weight = record.weight_kg,
        color = record.color,
        popularity = record.popularity,
        friendliness = record.friendliness,
        description = record.description,
    }
}
