//! Lingua Web Server
//!
//! Role-based language-learning platform service.

use clap::Parser;
use lingua_web::server::LinguaServerBuilder;
use lingua_web::{init_logging, WebConfig};

/// Lingua Web Server - role-based language-learning platform
#[derive(Parser)]
#[command(name = "lingua-web")]
#[command(about = "HTTP service for the Lingua platform")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable development mode (mounts the /api/dev route tree)
    #[arg(long)]
    dev: bool,

    /// Database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging first
    std::env::set_var(
        "RUST_LOG",
        format!("lingua_web={},tower_http=debug", args.log_level),
    );
    init_logging();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Create web configuration, command line overriding the environment
    let mut config = WebConfig::from_env();
    config.host = args.host;
    config.port = args.port;
    config.dev_mode = args.dev;
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    println!("🚀 Starting Lingua Web Server");
    println!("📍 Server: http://{}:{}", config.host, config.port);
    println!("🔧 Development mode: {}", config.dev_mode);
    println!("🗄️  Database: {}", config.database_url);

    if std::env::var("LINGUA_JWT_SECRET").is_err() {
        println!("⚠️  Warning: LINGUA_JWT_SECRET is not set; using the built-in");
        println!("   development secret. Set it before deploying.");
    }

    // Build and start the server
    let server = match LinguaServerBuilder::new()
        .host(config.host.clone())
        .port(config.port)
        .dev_mode(config.dev_mode)
        .database_url(config.database_url.clone())
        .build()
        .await
    {
        Ok(server) => server,
        Err(e) => {
            eprintln!("❌ Failed to build server: {}", e);
            std::process::exit(1);
        }
    };

    // Start the server (this will block until shutdown)
    if let Err(e) = server.start().await {
        eprintln!("❌ Server failed to start: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        use clap::Parser;

        // Test default values
        let args = Args::parse_from(["lingua-web"]);
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 8080);
        assert!(!args.dev);

        // Test custom values
        let args =
            Args::parse_from(["lingua-web", "--host", "0.0.0.0", "--port", "3000", "--dev"]);
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 3000);
        assert!(args.dev);
    }
}
