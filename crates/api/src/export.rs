use std::{fs::OpenOptions, io, path::Path};

use market_core::ClassId;
use session::{EventHistoryCsvWriter, EventRecord};

/// Appends a closed market's events, writing the header first when the file is empty.
pub fn append_event_history(
    path: &Path,
    class: ClassId,
    records: &[EventRecord],
) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let empty = file.metadata()?.len() == 0;

    let mut writer = EventHistoryCsvWriter::new(file);
    if empty {
        writer.write_header()?;
    }
    writer.append_records(class, records)
}
