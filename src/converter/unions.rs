use serde_json::{json, Value};

/// Combine converted union members into a `oneOf`.
///
/// Duplicate members are dropped; a union with a single distinct member
/// collapses to that member.
pub fn create_one_of(members: Vec<Value>) -> Value {
    let mut distinct: Vec<Value> = Vec::with_capacity(members.len());
    for member in members {
        if !distinct.contains(&member) {
            distinct.push(member);
        }
    }
    if distinct.len() == 1 {
        return distinct.remove(0);
    }
    json!({ "oneOf": distinct })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_members() {
        let union = create_one_of(vec![
            json!({"type": "null"}),
            json!({"type": "string"}),
            json!({"type": "null"}),
        ]);
        assert_eq!(union, json!({"oneOf": [{"type": "null"}, {"type": "string"}]}));
    }

    #[test]
    fn single_member_collapses() {
        assert_eq!(create_one_of(vec![json!({"type": "string"})]), json!({"type": "string"}));
    }
}
