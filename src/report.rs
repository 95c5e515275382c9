//! Human-readable summary printed at the end of a conversion.

use std::fmt;
use std::path::PathBuf;

/// Final counts for a conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub output_path: PathBuf,
    pub total_words: u64,
    pub total_definitions: u64,
    pub word_types: u64,
    pub inserted: u64,
    pub skipped: u64,
    /// Not printed; part of `inserted`.
    pub merged: u64,
    pub size_bytes: u64,
}

impl Summary {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(
            f,
            "✅ Database created successfully: {}",
            self.output_path.display()
        )?;
        writeln!(f, "📊 Statistics:")?;
        writeln!(f, "   - Total words: {}", format_number(self.total_words))?;
        writeln!(
            f,
            "   - Total definitions: {}",
            format_number(self.total_definitions)
        )?;
        writeln!(f, "   - Word types: {}", self.word_types)?;
        writeln!(f, "   - Inserted: {}", format_number(self.inserted))?;
        writeln!(f, "   - Skipped: {}", format_number(self.skipped))?;
        write!(f, "   - Database size: {:.2} MB", self.size_mb())
    }
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_summary_format() {
        let summary = Summary {
            output_path: PathBuf::from("public/kannada-dictionary.db"),
            total_words: 12345,
            total_definitions: 23456,
            word_types: 14,
            inserted: 12400,
            skipped: 3,
            merged: 55,
            size_bytes: 3 * 1024 * 1024 + 512 * 1024,
        };

        let expected = "\n\
✅ Database created successfully: public/kannada-dictionary.db\n\
📊 Statistics:\n   - Total words: 12,345\n   - Total definitions: 23,456\n   - Word types: 14\n   - Inserted: 12,400\n   - Skipped: 3\n   - Database size: 3.50 MB";
        assert_eq!(summary.to_string(), expected);
    }
}
