use std::io::{self, Write};

use crate::core::record::SimpleSamRecord;
use crate::output::{RecordWriter, SamHeader};

/// Writes one JSON object per line. No header is written.
pub struct JsonLinesWriter<W: Write> {
    inner: W,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> RecordWriter for JsonLinesWriter<W> {
    fn write_header(&mut self, _header: &SamHeader) -> io::Result<()> {
        Ok(())
    }

    fn write_record(&mut self, record: &SimpleSamRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.inner, record)?;
        self.inner.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{MasRecord, MAPQ_UNAVAILABLE};

    #[test]
    fn test_json_lines() {
        let mas = MasRecord {
            line_number: 3,
            chrom: "chrX".to_string(),
            read_name: "r7".to_string(),
            read_str: "GATTACA".to_string(),
            position: 5,
        };
        let record = SimpleSamRecord::from_mas(&mas, MAPQ_UNAVAILABLE, false);

        let mut writer = JsonLinesWriter::new(Vec::new());
        writer.write_header(&SamHeader::default()).unwrap();
        writer.write_record(&record).unwrap();
        writer.write_record(&record).unwrap();
        writer.finish().unwrap();

        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["qname"], "r7");
        assert_eq!(value["rname"], "chrX");
        assert_eq!(value["pos"], 5);
        assert_eq!(value["mapq"], 255);
        assert_eq!(value["cigar"], "7M");
        assert_eq!(value["seq"], "GATTACA");
        assert_eq!(value["qual"], "*");
    }
}
