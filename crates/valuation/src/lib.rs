pub mod impact;
pub mod investment;
pub mod portfolio;
pub mod report;

pub use impact::{apply_event, apply_impact, ImpactRange, Revaluation};
pub use investment::{apply_investment, InvestmentError, InvestmentReceipt};
pub use portfolio::{total_investment, PortfolioSummary, PortfolioTracker};
pub use report::{FinalReport, Performer, RankLabel, RankedCompany};
