use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CsvDelimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Pipe,
}

impl CsvDelimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CsvDelimiter::Comma => "comma",
            CsvDelimiter::Semicolon => "semicolon",
            CsvDelimiter::Tab => "tab",
            CsvDelimiter::Pipe => "pipe",
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "latin-1")]
    Latin1,
    #[serde(rename = "utf-16")]
    Utf16,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Utf16 => "utf-16",
        }
    }
}

/// `csv` options other than the defaults switch to the customised csv export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOpts {
    pub format: ExportFormat,
    pub delimiter: CsvDelimiter,
    pub include_header: bool,
    pub encoding: TextEncoding,
}

impl Default for ExportOpts {
    fn default() -> Self {
        ExportOpts {
            format: ExportFormat::Csv,
            delimiter: CsvDelimiter::Comma,
            include_header: true,
            encoding: TextEncoding::Utf8,
        }
    }
}

impl ExportOpts {
    pub fn xlsx() -> ExportOpts {
        ExportOpts {
            format: ExportFormat::Xlsx,
            ..ExportOpts::default()
        }
    }

    pub fn is_customized_csv(&self) -> bool {
        self.format == ExportFormat::Csv
            && (self.delimiter != CsvDelimiter::Comma
                || !self.include_header
                || self.encoding != TextEncoding::Utf8)
    }
}
