use crate::domain::{Group, Lamp};
use crate::ordering::ordered_by_name;

/// The subset of a provider's flat lamp collection belonging to `group`,
/// ordered by display name. Stateless; recomputed from the session-held
/// snapshot on every call.
pub fn lamps_for(group: &Group, lamps: &[Lamp]) -> Vec<Lamp> {
    let members = lamps.iter().filter(|lamp| lamp.group_id == group.id).cloned().collect::<Vec<_>>();
    ordered_by_name(&members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn group(id: &str, name: &str) -> Group {
        Group {
            id: id.to_string(),
            name: name.to_string(),
            provider_id: "p1".to_string(),
        }
    }

    fn lamp(id: &str, group_id: &str, name: &str) -> Lamp {
        Lamp {
            id: id.to_string(),
            name: name.to_string(),
            group_id: group_id.to_string(),
            state: false,
        }
    }

    #[test]
    fn each_group_sees_exactly_its_own_lamps() {
        let groups = vec![group("1", "A"), group("2", "B")];
        let lamps = vec![lamp("10", "2", "Y"), lamp("11", "1", "X")];

        let in_a = lamps_for(&groups[0], &lamps);
        let in_b = lamps_for(&groups[1], &lamps);

        assert_eq!(in_a.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec!["11"]);
        assert_eq!(in_b.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec!["10"]);
    }

    #[test]
    fn lamps_are_ordered_by_display_name() {
        let g = group("1", "A");
        let lamps = vec![lamp("10", "1", "Zed"), lamp("11", "1", "Alpha"), lamp("12", "1", "Mid")];

        let ordered = lamps_for(&g, &lamps);

        assert_eq!(ordered.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(), vec!["Alpha", "Mid", "Zed"]);
    }

    #[test]
    fn a_group_without_lamps_is_empty() {
        let g = group("1", "A");
        let lamps = vec![lamp("10", "2", "Y")];

        assert_eq!(lamps_for(&g, &lamps), vec![]);
    }
}
