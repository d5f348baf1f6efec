pub mod engine;
pub mod events;
pub mod history;
pub mod logging;

pub use engine::{ActionError, ActiveEvent, MarketSession};
pub use events::SessionEvent;
pub use history::{EventHistoryCsvWriter, EventRecord, PortfolioPoint, EVENT_HISTORY_CSV_HEADER};
pub use logging::{InMemoryRunLogWriter, RunLogWriter, TracingRunLogWriter};
