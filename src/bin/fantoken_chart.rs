use fantoken_chart::config::Config;
use fantoken_chart::fetchers::graph::SubgraphSnapshotFetcher;
use fantoken_chart::fetchers::social::SocialProfileFetcher;
use fantoken_chart::models::frame::{FrameAction, InteractionContext};
use fantoken_chart::render;
use fantoken_chart::resolver::{FidLookup, Resolver};
use fantoken_chart::services::frame_service::FrameService;

use clap::{App, Arg, SubCommand};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::sync::Arc;

fn context_args<'a>(subcommand: App<'a>) -> App<'a> {
    subcommand
        .arg(
            Arg::with_name("input")
                .short('i')
                .long("input")
                .value_name("TEXT")
                .help("Free-form search input (FID, username or @username)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("action")
                .short('a')
                .long("action")
                .value_name("ACTION")
                .help("Action signal (random, search, my_token)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("requester")
                .short('r')
                .long("requester")
                .value_name("FID")
                .help("Requester FID from the frame message")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("url")
                .short('u')
                .long("url")
                .value_name("URL")
                .help("Inbound request URL for fallback fid extraction")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("lookup")
                .short('l')
                .long("lookup")
                .value_name("PATH")
                .help("Path to the username/fid lookup dataset")
                .takes_value(true)
                .default_value("data/output_file.json"),
        )
}

// 从命令行参数拼装交互上下文
fn build_context(matches: &clap::ArgMatches) -> Result<InteractionContext, Box<dyn Error>> {
    let action = match matches.value_of("action") {
        Some(value) => Some(
            FrameAction::from_query(value)
                .ok_or_else(|| format!("Unknown action: {}", value))?,
        ),
        None => None,
    };
    let requester_fid = match matches.value_of("requester") {
        Some(value) => Some(value.parse::<u64>()?),
        None => None,
    };

    Ok(InteractionContext {
        input_text: matches.value_of("input").map(str::to_string),
        requester_fid,
        action,
        url: matches.value_of("url").map(str::to_string),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    let app = App::new("fantoken-chart")
        .version("0.1.0")
        .author("Fan Token Chart Team")
        .about("Fan Token price chart frame renderer");

    // 添加子命令
    let app = app
        .subcommand(
            context_args(SubCommand::with_name("render"))
                .about("Resolve an interaction, fetch live data and render the frame card")
                .arg(
                    Arg::with_name("out")
                        .short('o')
                        .long("out")
                        .value_name("PATH")
                        .help("Output path for the rendered SVG card")
                        .takes_value(true)
                        .default_value("frame.svg"),
                ),
        )
        .subcommand(
            context_args(SubCommand::with_name("resolve"))
                .about("Resolve an interaction to a token symbol without fetching")
                .arg(
                    Arg::with_name("seed")
                        .long("seed")
                        .value_name("SEED")
                        .help("Fixed RNG seed for reproducible random picks")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("cast-action")
                .about("Print the cast action install descriptor")
                .arg(
                    Arg::with_name("base-url")
                        .long("base-url")
                        .value_name("URL")
                        .help("Public base URL of the frame")
                        .takes_value(true)
                        .default_value("https://moxie-chart-frame.vercel.app"),
                ),
        );

    let matches = app.get_matches();

    if let Some(matches) = matches.subcommand_matches("render") {
        let lookup_path = matches.value_of("lookup").unwrap();
        let out_path = matches.value_of("out").unwrap();
        let ctx = build_context(matches)?;

        // 创建配置与查找表
        let config = Config::new()
            .with_lookup_path(lookup_path)
            .with_social_api_key(std::env::var("AIRSTACK_API_KEY").ok());
        let lookup = FidLookup::load_from_file(&config.lookup_path)?;
        let resolver = Resolver::new(lookup).with_default_fid(config.default_fid);

        // 创建抓取器
        let snapshots = Arc::new(SubgraphSnapshotFetcher::new(
            &config.graph_endpoint,
            config.request_timeout_secs,
        )?);
        let profiles = Arc::new(SocialProfileFetcher::new(
            &config.social_endpoint,
            config.social_api_key.clone(),
            config.request_timeout_secs,
        )?);

        let service = FrameService::new(config, resolver, snapshots, profiles);
        let response = service.handle(&ctx).await;

        std::fs::write(out_path, &response.image)?;
        info!("Rendered frame card to {}", out_path);

        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if let Some(matches) = matches.subcommand_matches("resolve") {
        let lookup_path = matches.value_of("lookup").unwrap();
        let ctx = build_context(matches)?;

        let lookup = match FidLookup::load_from_file(lookup_path) {
            Ok(lookup) => lookup,
            Err(e) => {
                error!("Failed to load lookup dataset: {}", e);
                return Err(e.into());
            }
        };
        let resolver = Resolver::new(lookup);

        let symbol = match matches.value_of("seed") {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed.parse::<u64>()?);
                resolver.resolve_with_rng(&ctx, &mut rng)
            }
            None => resolver.resolve(&ctx),
        };

        println!("{}", symbol);
    } else if let Some(matches) = matches.subcommand_matches("cast-action") {
        let base_url = matches.value_of("base-url").unwrap();
        let descriptor = render::cast_action(base_url);
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
    } else {
        info!("No command specified. Use --help for usage information.");
    }

    Ok(())
}
