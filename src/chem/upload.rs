/// Splits an uploaded text file into SMILES entries.
///
/// Entries are separated by commas or line breaks; surrounding whitespace is
/// trimmed and empty entries are skipped. Order and duplicates are kept so
/// the upload report mirrors the file.
pub fn parse_smiles_list(content: &str) -> Vec<String> {
    content
        .split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
