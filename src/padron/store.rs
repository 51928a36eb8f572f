use std::collections::HashMap;

use crate::padron::*;

use serde::{Deserialize, Serialize};

/// A member, as kept in the roster of an operator.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct StoredMember {
    pub id: u64,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "nationalId")]
    pub national_id: String,
    pub voted: bool,
}

/// The rosters of the operators. Each operator only ever sees its own roster.
pub trait RosterStore {
    /// All the members, in insertion order.
    fn members(&self, operator: &str) -> PadronResult<Vec<StoredMember>>;

    /// Clears the roster, then inserts all the records as not having voted.
    /// Returns the number of members inserted.
    fn replace_all(&mut self, operator: &str, records: &[MemberRecord]) -> PadronResult<usize>;

    /// Returns the id of the new member.
    fn insert(&mut self, operator: &str, record: &MemberRecord) -> PadronResult<u64>;

    /// Marks a member as having voted. Voting more than once has no further effect.
    /// Returns false if there is no such member.
    fn mark_voted(&mut self, operator: &str, id: u64) -> PadronResult<bool>;

    /// Returns false if there is no such member.
    fn delete(&mut self, operator: &str, id: u64) -> PadronResult<bool>;
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
struct RosterFile {
    #[serde(rename = "nextId")]
    next_id: u64,
    members: Vec<StoredMember>,
}

impl RosterFile {
    fn replace_all(&mut self, records: &[MemberRecord]) -> usize {
        self.members.clear();
        for r in records {
            self.insert(&MemberRecord {
                voted: false,
                ..r.clone()
            });
        }
        records.len()
    }

    fn insert(&mut self, record: &MemberRecord) -> u64 {
        // Ids start at 1
        self.next_id += 1;
        self.members.push(StoredMember {
            id: self.next_id,
            full_name: record.full_name.clone(),
            national_id: record.national_id.clone(),
            voted: record.voted,
        });
        self.next_id
    }

    fn mark_voted(&mut self, id: u64) -> bool {
        match self.members.iter_mut().find(|m| m.id == id) {
            Some(m) => {
                m.voted = true;
                true
            }
            None => false,
        }
    }

    fn delete(&mut self, id: u64) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        self.members.len() != before
    }
}

/// Keeps the roster of each operator in a JSON file `padron_<operator>.json`.
///
/// The files are rewritten whole: the new content goes to a temporary file that
/// then replaces the roster file.
pub struct JsonRosterStore {
    data_dir: PathBuf,
}

impl JsonRosterStore {
    pub fn new(data_dir: PathBuf) -> JsonRosterStore {
        JsonRosterStore { data_dir }
    }

    fn roster_path(&self, operator: &str) -> PathBuf {
        self.data_dir.join(format!("padron_{}.json", operator))
    }

    fn load(&self, operator: &str) -> PadronResult<RosterFile> {
        let p = self.roster_path(operator);
        let path = p.display().to_string();
        if !p.exists() {
            debug!("load: no roster file {:?}, starting empty", path);
            return Ok(RosterFile::default());
        }
        let contents = fs::read_to_string(&p).context(OpeningJsonSnafu { path: path.clone() })?;
        let roster: RosterFile =
            serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
        Ok(roster)
    }

    fn save(&self, operator: &str, roster: &RosterFile) -> PadronResult<()> {
        let p = self.roster_path(operator);
        let tmp_p = self.data_dir.join(format!(".padron_{}.json.tmp", operator));
        let tmp_path = tmp_p.display().to_string();
        let js = serde_json::to_string_pretty(roster).context(ParsingJsonSnafu {
            path: tmp_path.clone(),
        })?;
        fs::create_dir_all(&self.data_dir).context(WritingFileSnafu {
            path: self.data_dir.display().to_string(),
        })?;
        fs::write(&tmp_p, js).context(WritingFileSnafu {
            path: tmp_path.clone(),
        })?;
        fs::rename(&tmp_p, &p).context(WritingFileSnafu {
            path: p.display().to_string(),
        })?;
        debug!("save: {} members written to {:?}", roster.members.len(), p);
        Ok(())
    }

    fn update<T>(&self, operator: &str, f: impl FnOnce(&mut RosterFile) -> T) -> PadronResult<T> {
        let mut roster = self.load(operator)?;
        let res = f(&mut roster);
        self.save(operator, &roster)?;
        Ok(res)
    }
}

impl RosterStore for JsonRosterStore {
    fn members(&self, operator: &str) -> PadronResult<Vec<StoredMember>> {
        Ok(self.load(operator)?.members)
    }

    fn replace_all(&mut self, operator: &str, records: &[MemberRecord]) -> PadronResult<usize> {
        self.update(operator, |r| r.replace_all(records))
    }

    fn insert(&mut self, operator: &str, record: &MemberRecord) -> PadronResult<u64> {
        self.update(operator, |r| r.insert(record))
    }

    fn mark_voted(&mut self, operator: &str, id: u64) -> PadronResult<bool> {
        self.update(operator, |r| r.mark_voted(id))
    }

    fn delete(&mut self, operator: &str, id: u64) -> PadronResult<bool> {
        self.update(operator, |r| r.delete(id))
    }
}

/// Rosters kept in memory only.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Default)]
pub struct MemoryRosterStore {
    rosters: HashMap<String, RosterFile>,
}

#[cfg_attr(not(test), allow(dead_code))]
impl MemoryRosterStore {
    fn roster(&mut self, operator: &str) -> &mut RosterFile {
        self.rosters.entry(operator.to_string()).or_default()
    }
}

impl RosterStore for MemoryRosterStore {
    fn members(&self, operator: &str) -> PadronResult<Vec<StoredMember>> {
        Ok(self
            .rosters
            .get(operator)
            .map(|r| r.members.clone())
            .unwrap_or_default())
    }

    fn replace_all(&mut self, operator: &str, records: &[MemberRecord]) -> PadronResult<usize> {
        Ok(self.roster(operator).replace_all(records))
    }

    fn insert(&mut self, operator: &str, record: &MemberRecord) -> PadronResult<u64> {
        Ok(self.roster(operator).insert(record))
    }

    fn mark_voted(&mut self, operator: &str, id: u64) -> PadronResult<bool> {
        Ok(self.roster(operator).mark_voted(id))
    }

    fn delete(&mut self, operator: &str, id: u64) -> PadronResult<bool> {
        Ok(self.roster(operator).delete(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<MemberRecord> {
        vec![
            MemberRecord::new("Gomez Ana", "111"),
            MemberRecord::new("Diaz Luis", "222"),
        ]
    }

    fn exercise(store: &mut dyn RosterStore) {
        assert!(store.members("usuario1").unwrap().is_empty());
        assert_eq!(store.replace_all("usuario1", &records()).unwrap(), 2);
        let members = store.members("usuario1").unwrap();
        assert_eq!(members.len(), 2);
        assert!(members.iter().all(|m| !m.voted));

        let id = members[1].id;
        assert!(store.mark_voted("usuario1", id).unwrap());
        assert!(store.mark_voted("usuario1", id).unwrap());
        assert!(!store.mark_voted("usuario1", 999).unwrap());
        let voted: Vec<bool> = store
            .members("usuario1")
            .unwrap()
            .iter()
            .map(|m| m.voted)
            .collect();
        assert_eq!(voted, vec![false, true]);

        let new_id = store
            .insert("usuario1", &MemberRecord::new("Sosa Eva", "333"))
            .unwrap();
        assert!(new_id > id);
        assert!(store.delete("usuario1", members[0].id).unwrap());
        assert!(!store.delete("usuario1", members[0].id).unwrap());
        let names: Vec<String> = store
            .members("usuario1")
            .unwrap()
            .iter()
            .map(|m| m.full_name.clone())
            .collect();
        assert_eq!(names, vec!["Diaz Luis", "Sosa Eva"]);

        // Rosters are independent
        assert!(store.members("usuario2").unwrap().is_empty());
        store.replace_all("usuario2", &records()[..1]).unwrap();
        assert_eq!(store.members("usuario1").unwrap().len(), 2);

        // Import clears the votes
        store.replace_all("usuario1", &records()).unwrap();
        assert!(store
            .members("usuario1")
            .unwrap()
            .iter()
            .all(|m| !m.voted));
    }

    #[test]
    fn memory_store() {
        let mut store = MemoryRosterStore::default();
        exercise(&mut store);
    }

    #[test]
    fn json_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonRosterStore::new(dir.path().join("rosters"));
        exercise(&mut store);
        assert!(dir.path().join("rosters").join("padron_usuario1.json").exists());

        // The content survives a new store instance.
        let store2 = JsonRosterStore::new(dir.path().join("rosters"));
        assert_eq!(
            store.members("usuario1").unwrap(),
            store2.members("usuario1").unwrap()
        );
    }

    #[test]
    fn ids_are_not_reused() {
        let mut store = MemoryRosterStore::default();
        let a = store
            .insert("usuario1", &MemberRecord::new("A", "1"))
            .unwrap();
        store.delete("usuario1", a).unwrap();
        let b = store
            .insert("usuario1", &MemberRecord::new("B", "2"))
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn corrupted_roster() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("padron_usuario1.json"), "not json").unwrap();
        let store = JsonRosterStore::new(dir.path().to_path_buf());
        let err = store.members("usuario1").unwrap_err();
        assert!(matches!(err, PadronError::ParsingJson { .. }));
    }
}
