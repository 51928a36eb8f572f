use std::io::Write;

use crate::padron::roster::Tally;
use crate::padron::store::StoredMember;
use crate::padron::*;

pub fn default_file_name(operator: &str) -> String {
    format!("padron_{}.csv", operator)
}

/// Writes the roster with the vote of each member, followed by a summary of the counts.
pub fn write_roster<W: Write>(
    out: W,
    members: &[StoredMember],
    tally: &Tally,
) -> PadronResult<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);
    wtr.write_record(["ID", "Nombre", "DNI", "Voto"])
        .context(WritingExportSnafu {})?;
    for m in members {
        wtr.write_record([
            m.id.to_string().as_str(),
            m.full_name.as_str(),
            m.national_id.as_str(),
            if m.voted { "VOTÓ" } else { "NO VOTÓ" },
        ])
        .context(WritingExportSnafu {})?;
    }

    // One empty line between the roster and the summary
    wtr.write_record(Vec::<&str>::new())
        .context(WritingExportSnafu {})?;
    wtr.write_record(["Descripción", "Cantidad"])
        .context(WritingExportSnafu {})?;
    for (label, count) in [
        ("Total socios", tally.total),
        ("Votaron", tally.voted),
        ("Faltan", tally.remaining),
    ] {
        wtr.write_record([label, count.to_string().as_str()])
            .context(WritingExportSnafu {})?;
    }
    wtr.flush()
        .map_err(csv::Error::from)
        .context(WritingExportSnafu {})?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_layout() {
        let members = vec![
            StoredMember {
                id: 4,
                full_name: "Gomez Ana".to_string(),
                national_id: "111".to_string(),
                voted: true,
            },
            StoredMember {
                id: 7,
                full_name: "Diaz, Luis".to_string(),
                national_id: "222".to_string(),
                voted: false,
            },
        ];
        let tally = Tally::from_members(&members);
        let mut buf: Vec<u8> = Vec::new();
        write_roster(&mut buf, &members, &tally).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID,Nombre,DNI,Voto");
        assert_eq!(lines[1], "4,Gomez Ana,111,VOTÓ");
        assert_eq!(lines[2], "7,\"Diaz, Luis\",222,NO VOTÓ");
        assert_eq!(lines[4], "Descripción,Cantidad");
        assert_eq!(lines[5], "Total socios,2");
        assert_eq!(lines[6], "Votaron,1");
        assert_eq!(lines[7], "Faltan,1");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn export_file_name() {
        assert_eq!(default_file_name("usuario3"), "padron_usuario3.csv");
    }
}
