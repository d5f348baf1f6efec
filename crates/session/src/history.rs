use std::io::{self, Write};

use market_core::{ClassId, Polarity};
use serde::{Deserialize, Serialize};

const EVENT_HISTORY_CSV_COLUMNS: [&str; 6] = [
    "class",
    "elapsed_seconds",
    "time",
    "polarity",
    "event",
    "affected_companies",
];

pub const EVENT_HISTORY_CSV_HEADER: &str =
    "class,elapsed_seconds,time,polarity,event,affected_companies\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub time: String,
    pub elapsed_seconds: u32,
    pub text: String,
    pub polarity: Polarity,
    pub affected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPoint {
    pub time: String,
    pub value: f64,
    pub change_pct: f64,
}

pub struct EventHistoryCsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> EventHistoryCsvWriter<W> {
    pub fn new(writer: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        Self { writer }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        self.writer.write_record(EVENT_HISTORY_CSV_COLUMNS)?;
        self.writer.flush()
    }

    pub fn append_records(&mut self, class: ClassId, records: &[EventRecord]) -> io::Result<()> {
        for record in records {
            let elapsed = record.elapsed_seconds.to_string();
            let affected = record.affected.join(";");
            self.writer.write_record([
                class.as_str(),
                elapsed.as_str(),
                record.time.as_str(),
                record.polarity.as_str(),
                record.text.as_str(),
                affected.as_str(),
            ])?;
        }
        self.writer.flush()
    }
}
