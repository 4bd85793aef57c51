use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use ctxlog::config::load_config;
use ctxlog::observability::init_tracing;
use ctxlog::{
    from_context, kv, to_context, with_default_attrs, with_group, with_handler, with_level,
    Context, HandlerOptions, JsonHandler, Level, LogConfig, Logger, TextHandler, TracingHandler,
};

#[derive(Parser)]
#[command(name = "ctxlog-demo")]
#[command(about = "Walk through the ctxlog logger facade", long_about = None)]
struct Cli {
    /// Optional TOML logger configuration for the basic scenario.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Levels, fields, groups and errors
    Basic,
    /// A service carrying default attributes and a group
    Service,
    /// Request-scoped loggers propagated through a context
    Middleware {
        /// Number of concurrent requests
        #[arg(short, long, default_value_t = 3)]
        requests: usize,
    },
    /// JSON, text and tracing output
    Handlers,
    /// Run every scenario
    All,
}

#[derive(Debug, thiserror::Error)]
enum UserError {
    #[error("invalid user ID: {0}")]
    InvalidId(i64),
    #[error("user not found: {0}")]
    NotFound(i64),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("ctxlog=debug")?;
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LogConfig::default(),
    };
    config.apply_env_overrides()?;
    let logger = Logger::from_config(&config)?;

    match cli.command {
        Commands::Basic => basic(&logger).await,
        Commands::Service => service(),
        Commands::Middleware { requests } => middleware(requests).await,
        Commands::Handlers => handlers(),
        Commands::All => {
            basic(&logger).await;
            service();
            middleware(3).await;
            handlers();
        }
    }

    Ok(())
}

async fn basic(logger: &Logger) {
    println!("== basic ==");
    logger.info("Application started", kv![]);
    logger.warn("This is a warning message", kv![]);
    logger.error("An error occurred", &io::Error::other("sample error"), kv![]);

    let debug_logger = Logger::new([with_level(Level::Debug)]);
    debug_logger.debug("This is a debug message", kv!["debug_key", "debug_value"]);

    let ctx = to_context(&Context::background(), logger.clone());
    from_context(&ctx).info("Message using logger from context", kv![]);

    logger
        .with(kv!["user_id", 123, "action", "login"])
        .info("User logged in", kv![]);
    logger
        .with(kv!["method", "GET", "url", "/api/users", "status", 200])
        .info("API request completed", kv![]);

    let user_logger = logger.group("user-service");
    user_logger
        .with(kv!["user_id", 456])
        .info("Processing user request", kv![]);
    user_logger.with(kv!["user_id", 789]).error(
        "Failed to process user request",
        &io::Error::other("validation failed"),
        kv![],
    );

    let start = Instant::now();
    tokio::time::sleep(Duration::from_millis(100)).await;
    logger
        .with(kv!["duration", start.elapsed()])
        .info("Operation completed", kv![]);

    for user_id in [1001, 1002] {
        process_user(logger, user_id).await;
    }

    logger.with(kv!["dangling"]).warn("Malformed attributes are marked", kv![]);

    Logger::new([with_default_attrs(kv!["service", "user-service", "version", "1.0.0"])])
        .info("Log message with custom attributes", kv![]);
}

async fn process_user(logger: &Logger, user_id: i64) {
    let logger = logger.with(kv!["user_id", user_id]);
    logger.info("Starting user processing", kv![]);
    tokio::time::sleep(Duration::from_millis(50)).await;

    if user_id % 2 == 0 {
        logger.info("User processed successfully", kv![]);
    } else {
        logger.warn("User requires additional validation", kv![]);
    }
}

struct UserService {
    logger: Logger,
}

impl UserService {
    fn new() -> Self {
        Self {
            logger: Logger::new([
                with_default_attrs(kv!["service", "user-service"]),
                with_level(Level::Debug),
                with_group("ctx"),
            ]),
        }
    }

    fn create_user(&self, user_id: i64, username: &str) -> Result<(), UserError> {
        let logger = self.logger.with(kv!["user_id", user_id, "username", username]);
        logger.info("Creating new user", kv![]);

        if user_id < 0 {
            let err = UserError::InvalidId(user_id);
            logger.error("Failed to create user", &err, kv![]);
            return Err(err);
        }

        logger.info("User created successfully", kv![]);
        Ok(())
    }

    fn get_user(&self, user_id: i64) -> Result<String, UserError> {
        let logger = self.logger.with(kv!["user_id", user_id]);
        logger.debug("Fetching user details", kv![]);

        if user_id % 2 == 0 {
            logger.info("User found", kv!["has_data", true]);
            Ok(format!("user{}@example.com", user_id))
        } else {
            let err = UserError::NotFound(user_id);
            logger.error("User not found", &err, kv![]);
            Err(err)
        }
    }
}

fn service() {
    println!("== service ==");
    let users = UserService::new();

    for user_id in [1001, 1002, -1] {
        if let Err(e) = users.create_user(user_id, &format!("user_{}", user_id)) {
            println!("  Error creating user {}: {}", user_id, e);
        }
    }

    for user_id in [1002, 1003] {
        match users.get_user(user_id) {
            Ok(email) => println!("  Retrieved user {} with email: {}", user_id, email),
            Err(e) => println!("  Error getting user {}: {}", user_id, e),
        }
    }
}

/// Bind a request-scoped logger into the context before calling `next`.
async fn logging_middleware<F, Fut>(ctx: Context, next: F)
where
    F: FnOnce(Context) -> Fut,
    Fut: Future<Output = ()>,
{
    let request_id = uuid::Uuid::new_v4().to_string();
    let logger = Logger::new([with_default_attrs(kv![
        "request_id",
        request_id,
        "service",
        "api-gateway"
    ])]);
    let ctx = to_context(&ctx, logger.clone());

    let start = Instant::now();
    logger.info("Request started", kv![]);
    next(ctx).await;
    logger.info("Request completed", kv!["elapsed", start.elapsed()]);
}

async fn business_logic(ctx: Context) {
    let logger = from_context(&ctx);
    logger.info("Processing business logic", kv![]);
    tokio::time::sleep(Duration::from_millis(8)).await;
    logger.info("Business logic completed", kv!["result", "success"]);
}

async fn middleware(requests: usize) {
    println!("== middleware ==");
    let tasks: Vec<_> = (0..requests)
        .map(|_| tokio::spawn(logging_middleware(Context::background(), business_logic)))
        .collect();

    for task in tasks {
        if let Err(e) = task.await {
            tracing::error!(error = %e, "Request task failed");
        }
    }
}

fn handlers() {
    println!("== handlers ==");
    Logger::new([]).info("This uses the default JSON handler", kv!["format", "json"]);

    let text = TextHandler::new(
        io::stdout(),
        HandlerOptions {
            level: Level::Info,
            ..HandlerOptions::default()
        },
    );
    let text_logger = Logger::new([
        with_handler(text),
        with_default_attrs(kv!["app", "demo", "version", "1.0"]),
    ]);
    text_logger.info("Application started", kv!["port", 8080]);
    text_logger.warn("This is a warning in text format", kv![]);

    let debug_logger = Logger::new([
        with_handler(JsonHandler::new(io::stdout(), HandlerOptions::default())),
        with_level(Level::Debug),
        with_default_attrs(kv!["component", "debug-demo"]),
    ]);
    debug_logger.debug("Debug message", kv!["details", "verbose information"]);

    Logger::new([with_handler(TracingHandler::new())])
        .group("bridge")
        .info("Forwarded to the tracing subscriber", kv!["format", "tracing"]);
}
