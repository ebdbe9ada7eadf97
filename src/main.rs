use std::io::Write;
use std::process;

use anstream::{eprintln, println};
use clap::Parser;
use color_print::cformat;

use baserepo::config::{ResolverConfig, set_config_path};
use baserepo::git::{RemoteStore, Repository, set_base_path, sort_by_priority};
use baserepo::platform::{GlabApi, Project};
use baserepo::prompt::TerminalChooser;
use baserepo::resolve::{Collaborators, ResolvedRemotes};

mod cli;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Some(path) = cli.directory {
        set_base_path(path);
    }
    if let Some(path) = cli.config {
        set_config_path(path);
    }

    if let Err(e) = run(cli.command) {
        let message = format!("{e:#}");
        eprintln!("{}", cformat!("<red>✗</> {}", message));
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    let config = ResolverConfig::load()?;
    let repo = Repository::current().with_resolution_key(&config.resolution_key);

    match command {
        Commands::Base { repo: base, no_prompt } => {
            let api = glab_api(&config);
            let resolved = ResolvedRemotes::from_store(
                base.as_deref(),
                &config,
                Collaborators {
                    store: &repo,
                    api: &api,
                    chooser: &TerminalChooser,
                },
            )?;
            let base = resolved.base_repo(!no_prompt)?;
            if let Some(e) = &base.persist_error {
                eprintln!("{}", cformat!("<yellow>▲</> {}", e));
            }
            println!("{}", base.repo);
        }
        Commands::Heads => {
            let api = glab_api(&config);
            let resolved = ResolvedRemotes::from_store(
                None,
                &config,
                Collaborators {
                    store: &repo,
                    api: &api,
                    chooser: &TerminalChooser,
                },
            )?;
            for project in resolved.head_repos() {
                println!("{}", format_head(project));
            }
        }
        Commands::Remotes => {
            let mut remotes = repo.list_remotes()?;
            sort_by_priority(&mut remotes, &config.remote_priority);
            for remote in remotes {
                let tag = if remote.resolved.is_empty() {
                    String::new()
                } else {
                    cformat!(" <cyan>[{}]</>", remote.resolved)
                };
                println!(
                    "{}",
                    cformat!("<bold>{}</>\t{}{}", remote.name, remote.repo, tag)
                );
            }
        }
        Commands::Reset => {
            let cleared = repo.clear_resolutions()?;
            if cleared.is_empty() {
                println!("{}", cformat!("<dim>○ No saved resolutions</>"));
            }
            for name in cleared {
                println!("{}", cformat!("<green>✓</> Cleared resolution on <bold>{}</>", name));
            }
        }
    }
    Ok(())
}

/// One `heads` line: full name, web URL, and the fork parent if any.
fn format_head(project: &Project) -> String {
    let parent = project
        .forked_from_project
        .as_ref()
        .map(|p| cformat!(" <dim>(fork of {})</>", p.path_with_namespace))
        .unwrap_or_default();
    cformat!(
        "<bold>{}</>\t{}{}",
        project.path_with_namespace,
        project.web_url,
        parent
    )
}

fn glab_api(config: &ResolverConfig) -> GlabApi {
    match &config.api_hostname {
        Some(hostname) => GlabApi::with_hostname(hostname),
        None => GlabApi::new(),
    }
}
