use std::path::PathBuf;

use clap::Parser;
use pool_common::*;

/// Pool Designer - Design combinatorial DNA pools from a part library
#[derive(Parser, Debug)]
#[command(name = "pool-designer")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON list of component definitions to import
    #[arg(short = 'l', long)]
    pub library: PathBuf,

    /// Write every stored design space to this JSON file when done
    #[arg(short = 's', long)]
    pub snapshot: Option<PathBuf>,

    /// Label strictness when matching queries against constructs
    #[arg(long, value_enum, default_value = "shared-components")]
    pub strength: StrengthArg,

    /// Frontier seeding when matching queries against constructs
    #[arg(long, value_enum, default_value = "mixed")]
    pub degree: DegreeArg,

    /// How constructs are picked as candidates
    #[arg(long, value_enum, default_value = "size-matched")]
    pub candidates: CandidatesArg,

    /// Node count a construct must exceed with `--candidates fixed`
    #[arg(long, default_value_t = COMPOSITE_THRESHOLD)]
    pub threshold: usize,

    /// Save designed pools to the store as `<prefix><i>`
    #[arg(long)]
    pub persist_prefix: Option<String>,

    /// Pool specs such as "[pTet,pBAD],[r^gfp]"
    #[arg(required = true, num_args = 1..)]
    pub specs: Vec<String>,
}

impl Args {
    /// Convert command-line arguments into the workflow configuration
    pub fn to_config(&self) -> DesignConfig {
        let matching = MergeConfig {
            strength: self.strength.clone().into(),
            degree: self.degree.clone().into(),
            ..MergeConfig::matching()
        };
        let candidates = match self.candidates {
            CandidatesArg::SizeMatched => CandidatePolicy::SizeMatched,
            CandidatesArg::Fixed => CandidatePolicy::FixedThreshold(self.threshold),
        };

        let builder = DesignConfig::builder()
            .matching(matching)
            .candidates(candidates);
        match &self.persist_prefix {
            Some(prefix) => builder.persist_prefix(prefix.as_str()).build(),
            None => builder.build(),
        }
    }
}

/// Command-line argument wrapper for MatchStrength
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum StrengthArg {
    /// Identical id and role sets
    #[value(name = "identical")]
    Identical,
    /// A shared component id and a shared role
    #[value(name = "shared-components")]
    SharedComponents,
    /// A shared role
    #[value(name = "shared-roles")]
    SharedRoles,
}

impl From<StrengthArg> for MatchStrength {
    fn from(arg: StrengthArg) -> Self {
        match arg {
            StrengthArg::Identical => MatchStrength::Identical,
            StrengthArg::SharedComponents => MatchStrength::SharedComponents,
            StrengthArg::SharedRoles => MatchStrength::SharedRoles,
        }
    }
}

/// Command-line argument wrapper for MatchDegree
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum DegreeArg {
    /// Start nodes of both graphs
    #[value(name = "start-nodes")]
    StartNodes,
    /// Query start nodes against every construct node
    #[value(name = "mixed")]
    Mixed,
    /// Every node of both graphs
    #[value(name = "all-nodes")]
    AllNodes,
}

impl From<DegreeArg> for MatchDegree {
    fn from(arg: DegreeArg) -> Self {
        match arg {
            DegreeArg::StartNodes => MatchDegree::StartNodes,
            DegreeArg::Mixed => MatchDegree::Mixed,
            DegreeArg::AllNodes => MatchDegree::AllNodes,
        }
    }
}

/// Command-line argument wrapper for CandidatePolicy
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum CandidatesArg {
    /// Constructs at least as large as the query
    #[value(name = "size-matched")]
    SizeMatched,
    /// Constructs larger than `--threshold`
    #[value(name = "fixed")]
    Fixed,
}
