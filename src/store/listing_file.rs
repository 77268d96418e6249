use std::io::Read;

/// Extracts the URL column from delimited listing text
///
/// Rows shorter than `url_column + 1` fields (the disclaimer lines the
/// endpoint appends to large result sets, blank lines) are dropped without
/// error. The first remaining row is the header and is dropped as well.
pub fn parse_listing_urls<R: Read>(reader: R, url_column: usize) -> Result<Vec<String>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut urls = Vec::new();
    let mut record = csv::ByteRecord::new();
    while csv_reader.read_byte_record(&mut record)? {
        if let Some(field) = record.get(url_column) {
            urls.push(String::from_utf8_lossy(field).into_owned());
        }
    }

    if !urls.is_empty() {
        urls.remove(0);
    }

    Ok(urls)
}
