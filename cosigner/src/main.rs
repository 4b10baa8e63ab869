#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod config;
use config::Config;
mod artifacts;
use artifacts::Artifacts;
mod rpc;
use rpc::AlloyRpc;
mod error;
pub(crate) use error::Error;

mod create;
use create::{CreateTransaction, create_transaction};
mod submit;
use submit::{SubmitTransaction, submit_transaction};
mod message;
use message::{VerifyMessage, AssembleSignature, verify_message, assemble_signature};


#[derive(Parser)]
#[command(name = "evm-cosigner")]
#[command(about = "Finalize and publish transactions signed by an external signer")]
struct Cli {
  #[command(subcommand)]
  command: Command,

  /// The directory artifacts are read from and written to.
  ///
  /// Defaults to COSIGNER_ARTIFACTS, or the current directory.
  #[arg(long, global = true)]
  artifacts: Option<PathBuf>,

  /// The URL of the Ethereum node.
  ///
  /// Defaults to COSIGNER_RPC_URL.
  #[arg(long, global = true)]
  rpc_url: Option<String>,
}

#[derive(Subcommand)]
enum Command {
  /// Create a transaction and the hash for the external signer to sign
  CreateTransaction(CreateTransaction),
  /// Finalize the externally signed transaction and publish it
  SubmitTransaction(SubmitTransaction),
  /// Verify the external signer's signature over a personal message
  VerifyMessage(VerifyMessage),
  /// Assemble a personal message signature from its parts
  AssembleSignature(AssembleSignature),
}

async fn run(cli: Cli) -> Result<(), Error> {
  let config = Config::new(cli.rpc_url, cli.artifacts);
  let artifacts = Artifacts::new(config.artifacts.clone());

  match cli.command {
    Command::CreateTransaction(args) => {
      let rpc = AlloyRpc::connect(config.rpc_url()?)?;
      create_transaction(&rpc, &artifacts, &args).await?;
    }
    Command::SubmitTransaction(args) => {
      let rpc = AlloyRpc::connect(config.rpc_url()?)?;
      submit_transaction(&rpc, &artifacts, args).await?;
    }
    Command::VerifyMessage(args) => {
      println!("{}", serde_json::to_string_pretty(&verify_message(&artifacts, args)?)?);
    }
    Command::AssembleSignature(args) => {
      println!("{}", serde_json::to_string_pretty(&assemble_signature(args)?)?);
    }
  }
  Ok(())
}

#[tokio::main]
async fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  if let Err(e) = run(Cli::parse()).await {
    log::error!("{e}");
    std::process::exit(1);
  }
}
