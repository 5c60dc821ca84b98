//! decision-sim binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use decision_sim::agent::{AgentRuntime, StdConsole};
use decision_sim::cli::{run_main_loop, Cli, Commands, SimulateArgs};
use decision_sim::diagnostics::{install_error_handler, report_fatal};
use decision_sim::error::Result;
use decision_sim::personas::PersonaRegistry;
use decision_sim::simulator::DecisionSimulator;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    install_error_handler();

    if let Err(err) = run(cli).await {
        report_fatal(&err);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.completion.load_config()?;
    let runtime = AgentRuntime::create(Some(config))?;

    match cli.command {
        None | Some(Commands::Menu) => {
            let mut console = StdConsole::new()?;
            let mut personas = PersonaRegistry::new();
            run_main_loop(&mut console, &mut personas, &runtime).await
        }
        Some(Commands::Simulate(args)) => handle_simulate(runtime, args).await,
    }
}

async fn handle_simulate(runtime: AgentRuntime, args: SimulateArgs) -> Result<()> {
    let Some(scenario) = args.scenario else {
        println!("Please provide a scenario with --scenario or -s");
        return Ok(());
    };

    let simulator = DecisionSimulator::new(runtime, args.verbose);
    let results = simulator.simulate(&scenario, args.iterations).await?;

    println!("\nSimulation Results for: {scenario}");
    println!("{}", "=".repeat(50));
    for (i, result) in results.iter().enumerate() {
        println!("\nIteration {}:", i + 1);
        println!("Decision: {}", result.decision);
        println!("Outcome: {}", result.outcome);
        if simulator.verbose() {
            println!("Reasoning: {}", result.reasoning);
        }
    }
    Ok(())
}
