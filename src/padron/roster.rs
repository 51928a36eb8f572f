use crate::padron::store::StoredMember;

/// The members whose name or national ID contains the query, ignoring case.
/// An empty query matches everyone.
pub fn search<'a>(members: &'a [StoredMember], query: &str) -> Vec<&'a StoredMember> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return members.iter().collect();
    }
    members
        .iter()
        .filter(|m| {
            m.full_name.to_lowercase().contains(&q) || m.national_id.to_lowercase().contains(&q)
        })
        .collect()
}

/// Vote counts over a whole roster.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Tally {
    pub total: usize,
    pub voted: usize,
    pub remaining: usize,
}

impl Tally {
    pub fn from_members(members: &[StoredMember]) -> Tally {
        let total = members.len();
        let voted = members.iter().filter(|m| m.voted).count();
        Tally {
            total,
            voted,
            remaining: total - voted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: u64, name: &str, dni: &str, voted: bool) -> StoredMember {
        StoredMember {
            id,
            full_name: name.to_string(),
            national_id: dni.to_string(),
            voted,
        }
    }

    fn roster() -> Vec<StoredMember> {
        vec![
            member(1, "GOMEZ Ana", "20111222", true),
            member(2, "Diaz Luis", "30111444", false),
            member(3, "Muñoz Eva", "X-9", false),
        ]
    }

    fn ids(found: &[&StoredMember]) -> Vec<u64> {
        found.iter().map(|m| m.id).collect()
    }

    #[test]
    fn search_by_name_or_id() {
        let r = roster();
        assert_eq!(ids(&search(&r, "gómez")), Vec::<u64>::new());
        assert_eq!(ids(&search(&r, " gomez ")), vec![1]);
        assert_eq!(ids(&search(&r, "111")), vec![1, 2]);
        assert_eq!(ids(&search(&r, "MUÑOZ")), vec![3]);
        assert_eq!(ids(&search(&r, "x-9")), vec![3]);
        assert_eq!(ids(&search(&r, "  ")), vec![1, 2, 3]);
    }

    #[test]
    fn tally() {
        assert_eq!(
            Tally::from_members(&roster()),
            Tally {
                total: 3,
                voted: 1,
                remaining: 2
            }
        );
        assert_eq!(Tally::from_members(&[]).remaining, 0);
    }
}
