use calamine::DataType;

/// The text of a spreadsheet cell, as it would be read from the same sheet saved as CSV.
pub fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Empty => "".to_string(),
        DataType::Int(i) => i.to_string(),
        // IDs are usually typed as numbers: 20123456.0 must read 20123456
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        other => other.to_string(),
    }
}

/// Decodes the bytes of a CSV field. Files saved by older spreadsheet programs
/// are often in Latin-1 rather than UTF-8.
pub fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|b| *b as char).collect(),
    }
}

/// Picks the separator of a CSV file from its first line.
pub fn detect_delimiter(first_line: &[u8]) -> u8 {
    let semicolons = first_line.iter().filter(|b| **b == b';').count();
    let commas = first_line.iter().filter(|b| **b == b',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells() {
        assert_eq!(cell_text(&DataType::Float(20123456.0)), "20123456");
        assert_eq!(cell_text(&DataType::Float(1.5)), "1.5");
        assert_eq!(cell_text(&DataType::Int(-3)), "-3");
        assert_eq!(cell_text(&DataType::Empty), "");
        assert_eq!(cell_text(&DataType::String(" Perez ".to_string())), " Perez ");
    }

    #[test]
    fn latin1_fields() {
        assert_eq!(decode_field("Muñoz".as_bytes()), "Muñoz");
        assert_eq!(decode_field(&[b'M', b'u', 0xf1, b'o', b'z']), "Muñoz");
    }

    #[test]
    fn delimiters() {
        assert_eq!(detect_delimiter(b"Apellido;Nombre;DNI\n"), b';');
        assert_eq!(detect_delimiter(b"Apellido,Nombre,DNI\n"), b',');
        assert_eq!(detect_delimiter(b"\"Perez, Juan\";DNI;Socio\n"), b';');
        assert_eq!(detect_delimiter(b"DNI\n"), b',');
    }
}
