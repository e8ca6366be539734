/// One FASTQ record as read off the stream, line by line.
///
/// Every line is optional: a half-written file or a stream fault can leave
/// any suffix of the four lines missing. `header == None` means the stream
/// produced nothing at all this cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub header: Option<String>,
    pub bases: Option<String>,
    pub separator: Option<String>,
    pub quality: Option<String>,
}

impl RawRecord {
    /// True when all four lines were obtained.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.header.is_some()
            && self.bases.is_some()
            && self.separator.is_some()
            && self.quality.is_some()
    }
}
