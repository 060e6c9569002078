//! Command-line interface for the markscribe binary.
//!
//! Reads a template, renders it with the activity feeds and writes the
//! resulting document to stdout or to the path given with `--write`. Secrets
//! are only read from the environment.

use std::{
    env, fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
    sync::Arc,
    time::Duration,
};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use markscribe::{
    ConfigFile, Error, Feeds, GithubClient, GraphQlTransport, HttpFeedSource, RuntimeBridge,
    WakatimeClient, io_error, load_config, render_template, validate_login, viewer_login,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
const WAKATIME_API_KEY: &str = "WAKATIME_API_KEY";

/// Render a Markdown profile document from a template.
#[derive(Debug, Parser,)]
#[command(name = "markscribe", version, about = "Render a Markdown profile from a template")]
struct Cli
{
    /// Template file to render.
    #[arg(value_name = "TEMPLATE")]
    template: PathBuf,

    /// Write the rendered document to PATH instead of stdout.
    #[arg(long = "write", value_name = "PATH")]
    write: Option<PathBuf,>,

    /// Optional YAML settings file.
    #[arg(long = "config", value_name = "PATH", env = "MARKSCRIBE_CONFIG")]
    config: Option<PathBuf,>,

    /// Profile login used by self-referential feeds.
    #[arg(long = "login", value_name = "LOGIN", env = "GITHUB_LOGIN")]
    login: Option<String,>,

    /// WakaTime API root.
    #[arg(long = "wakatime-url", value_name = "URL", env = "WAKATIME_URL")]
    wakatime_url: Option<String,>,

    /// Deadline in seconds for the whole run.
    #[arg(long = "timeout", value_name = "SECS", env = "MARKSCRIBE_TIMEOUT")]
    timeout: Option<u64,>,
}

/// Secrets taken from the environment.
#[derive(Debug, Default,)]
struct Secrets
{
    github_token:     Option<String,>,
    wakatime_api_key: Option<String,>,
}

impl Secrets
{
    fn from_env() -> Self
    {
        Self {
            github_token:     env_secret(GITHUB_TOKEN,),
            wakatime_api_key: env_secret(WAKATIME_API_KEY,),
        }
    }
}

fn env_secret(name: &str,) -> Option<String,>
{
    env::var(name,).ok().map(|value| value.trim().to_owned(),).filter(|value| !value.is_empty(),)
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main()
{
    if let Err(error,) = run() {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates configuration, transport and rendering errors.
fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();
    init_tracing();

    let config = match cli.config.as_deref() {
        Some(path,) => load_config(path,)?,
        None => ConfigFile::default(),
    };
    let template =
        fs::read_to_string(&cli.template,).map_err(|source| io_error(&cli.template, source,),)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::transport("runtime", format!("failed to start runtime: {e}"),),)?;
    let deadline =
        cli.timeout.map(|secs| tokio::time::Instant::now() + Duration::from_secs(secs,),);
    let bridge = RuntimeBridge::new(runtime.handle().clone(),).with_deadline(deadline,);

    let feeds = build_feeds(&cli, &config, &Secrets::from_env(), bridge,)?;
    let document = render_with_spinner(&template, Arc::new(feeds,),)?;

    write_document(cli.write.as_deref(), &document,)
}

fn init_tracing()
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("markscribe=info",),);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter,)
        .with_writer(io::stderr,)
        .with_target(false,)
        .try_init();
}

/// Wires the network clients and profile settings into a feed context.
fn build_feeds(
    cli: &Cli,
    config: &ConfigFile,
    secrets: &Secrets,
    bridge: RuntimeBridge,
) -> Result<Feeds, Error,>
{
    let github = Arc::new(GithubClient::new(secrets.github_token.as_deref(), bridge.clone(),)?,);
    let login = resolve_login(
        config.resolved_login(cli.login.as_deref(),),
        secrets.github_token.is_some(),
        github.as_ref(),
    )?;
    let rss = Arc::new(HttpFeedSource::new(bridge.clone(),)?,);

    let mut feeds = Feeds::new(github, rss,).with_rss_authors(config.rss.authors.clone(),);
    if let Some(login,) = login {
        info!("Rendering profile of {}", login);
        feeds = feeds.with_login(login,);
    }
    if let Some(api_key,) = secrets.wakatime_api_key.as_deref() {
        let base_url = config.resolved_wakatime_url(cli.wakatime_url.as_deref(),);
        debug!("Using WakaTime API at {}", base_url);
        feeds = feeds.with_wakatime(Arc::new(WakatimeClient::new(api_key, &base_url, bridge,)?,),);
    }

    Ok(feeds,)
}

/// Validates a configured login or asks GitHub for the token owner.
///
/// Without a login and without a token the feeds that need a login fail
/// when a template calls them.
fn resolve_login(
    configured: Option<String,>,
    has_token: bool,
    github: &dyn GraphQlTransport,
) -> Result<Option<String,>, Error,>
{
    match configured {
        Some(login,) => {
            validate_login(&login,)?;
            Ok(Some(login,),)
        }
        None if has_token => viewer_login(github,).map(Some,),
        None => Ok(None,),
    }
}

fn render_with_spinner(template: &str, feeds: Arc<Feeds,>,) -> Result<String, Error,>
{
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.yellow} [{elapsed_precise}] {msg}",)
        .unwrap_or_else(|_| ProgressStyle::default_spinner(),);
    pb.set_style(style,);
    pb.set_message("Rendering template...",);
    pb.enable_steady_tick(Duration::from_millis(100,),);

    let result = render_template(template, feeds,);
    pb.finish_and_clear();
    result
}

fn write_document(path: Option<&Path,>, document: &str,) -> Result<(), Error,>
{
    match path {
        Some(path,) => {
            fs::write(path, document,).map_err(|source| io_error(path, source,),)?;
            info!("Wrote {} bytes to {}", document.len(), path.display());
            Ok((),)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(document.as_bytes(),)
                .and_then(|_| handle.flush(),)
                .map_err(|source| io_error(Path::new("<stdout>",), source,),)
        }
    }
}

#[cfg(test)]
mod tests
{
    use std::{fs, path::Path};

    use clap::Parser;
    use markscribe::{Error, GraphQlTransport};
    use serde_json::{Value, json};
    use tempfile::tempdir;

    use super::{Cli, resolve_login, write_document};

    struct ViewerTransport;

    impl GraphQlTransport for ViewerTransport
    {
        fn query(&self, _query: &str, _variables: Value,) -> Result<Value, Error,>
        {
            Ok(json!({ "viewer": { "login": "octocat" } }),)
        }
    }

    #[test]
    fn cli_accepts_template_and_flags()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--write",
            "README.md",
            "--login",
            "muesli",
            "--timeout",
            "30",
            "templates/profile.tpl",
        ],)
        .expect("failed to parse CLI",);

        assert_eq!(cli.template, Path::new("templates/profile.tpl"));
        assert_eq!(cli.write.as_deref(), Some(Path::new("README.md")));
        assert_eq!(cli.login.as_deref(), Some("muesli"));
        assert_eq!(cli.timeout, Some(30));
    }

    #[test]
    fn cli_requires_template()
    {
        assert!(Cli::try_parse_from([env!("CARGO_PKG_NAME")],).is_err());
    }

    #[test]
    fn cli_rejects_non_numeric_timeout()
    {
        let result = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--timeout",
            "soon",
            "profile.tpl",
        ],);
        assert!(result.is_err());
    }

    #[test]
    fn configured_login_is_validated()
    {
        let login = resolve_login(Some("muesli".to_owned(),), true, &ViewerTransport,)
            .expect("valid login",);
        assert_eq!(login.as_deref(), Some("muesli"));

        let error = resolve_login(Some("not valid".to_owned(),), true, &ViewerTransport,)
            .expect_err("invalid login",);
        assert!(matches!(error, Error::Validation { .. }));
    }

    #[test]
    fn missing_login_is_resolved_from_token_owner()
    {
        let login = resolve_login(None, true, &ViewerTransport,).expect("viewer login",);
        assert_eq!(login.as_deref(), Some("octocat"));

        assert!(resolve_login(None, false, &ViewerTransport,).expect("no login",).is_none());
    }

    #[test]
    fn write_document_creates_file()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("README.md",);

        write_document(Some(&path,), "# Hello\n",).expect("failed to write document",);

        assert_eq!(fs::read_to_string(&path,).expect("read back",), "# Hello\n");
    }

    #[test]
    fn write_document_reports_unwritable_path()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("missing",).join("README.md",);

        let error = write_document(Some(&path,), "x",).expect_err("expected I/O error",);
        assert!(matches!(error, Error::Io { .. }));
    }
}
