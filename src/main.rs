//! Fragment Binder CLI
//!
//! Usage:
//!   fragment-binder [OPTIONS] [TEMPLATE]
//!
//! Options:
//!   -c, --config <FILE>       Component config (TOML format)
//!   -o, --override <JSON>     Override data, wins over every other source
//!   -d, --data <FILE>         Prefetched data (JSON object)
//!   -f, --fields <FILE>       Content-management fields (JSON object)
//!   --fallback <REVISION>     Revision fallback: staged or published
//!   --page-state <STATE>      Derive the fallback from a page state
//!   -t, --templates <DIR>     Fetch the template from a local mirror
//!   --endpoint                Print the component endpoint and exit
//!   -w, --wrap                Wrap output in the host element
//!   -h, --help                Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fragment_binder::{
    compose_endpoint, fetch_server_props, render_component_with_config, render_template,
    ComponentConfig, ComponentProps, DataMap, DirectoryTemplateSource, PageState, RenderConfig,
    RenderError, RevisionFallback,
};

#[derive(Parser)]
#[command(name = "fragment-binder")]
#[command(about = "Bind data into remotely hosted HTML components")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    template: Option<PathBuf>,

    /// Component config file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override data as a JSON string
    #[arg(short = 'o', long = "override")]
    override_data: Option<String>,

    /// Prefetched data file (JSON object)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Content-management fields file (JSON object)
    #[arg(short, long)]
    fields: Option<PathBuf>,

    /// Revision used when the component does not pin one
    #[arg(long)]
    fallback: Option<RevisionFallback>,

    /// Page state the revision fallback is derived from
    #[arg(long)]
    page_state: Option<PageState>,

    /// Directory mirroring component endpoints, fetched instead of reading a template
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Print the component endpoint and exit
    #[arg(long)]
    endpoint: bool,

    /// Wrap output in the host element
    #[arg(short, long)]
    wrap: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ComponentConfig::from_file(path).unwrap_or_else(|e| {
            fail(&format!("Error loading config '{}': {}", path.display(), e))
        }),
        None => ComponentConfig::default(),
    };
    if let Some(fallback) = cli.fallback {
        config.revision_fallback = Some(fallback);
    }
    if let Some(state) = cli.page_state {
        config.page_state = Some(state);
    }
    if let Some(json) = &cli.override_data {
        config.component.data_override = Some(json.clone());
    }

    if cli.endpoint {
        println!(
            "{}",
            compose_endpoint(&config.component, config.revision_fallback())
        );
        return;
    }

    let template = match &cli.templates {
        Some(dir) => {
            let source = DirectoryTemplateSource::new(dir);
            let props = fetch_server_props(
                &config.component,
                config.page_state.unwrap_or_default(),
                &source,
            );
            props.template
        }
        None => read_template(cli.template.as_deref()),
    };

    let props = ComponentProps {
        params: Some(config.component.clone()),
        template: Some(template),
        fetched_data: cli.data.as_deref().map(read_json_object),
        fields: cli.fields.as_deref().map(read_json_object),
        revision_fallback: Some(config.revision_fallback()),
    };

    let result = if cli.wrap {
        let render_config = RenderConfig::new().with_element(config.element.clone());
        render_component_with_config(&props, &render_config).map(Option::unwrap_or_default)
    } else {
        render_template(props.template().unwrap_or_default(), &props.data_sources())
    };

    match result {
        Ok(html) => println!("{}", html),
        Err(RenderError::Data(e)) => {
            let source = config.component.data_override.as_deref().unwrap_or_default();
            eprintln!("{}", e.format(source, "override"));
            process::exit(1);
        }
    }
}

fn read_template(path: Option<&Path>) -> String {
    match path {
        Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
            fail(&format!("Error reading file '{}': {}", path.display(), e))
        }),
        None => {
            if io::stdin().is_terminal() {
                fail("No template given. Pass a file, pipe one on stdin, or use --templates.");
            }
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                fail(&format!("Error reading from stdin: {}", e));
            }
            buffer
        }
    }
}

fn read_json_object(path: &Path) -> DataMap {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("Error reading file '{}': {}", path.display(), e)));
    serde_json::from_str(&content).unwrap_or_else(|e| {
        fail(&format!(
            "Error parsing '{}' as a JSON object: {}",
            path.display(),
            e
        ))
    })
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}
