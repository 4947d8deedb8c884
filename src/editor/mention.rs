use crate::models::Entity;

/// Cap on the suggestion menu so a huge roster stays scannable.
pub(crate) const MAX_MENTION_ITEMS: usize = 20;

/// An in-progress `@name` fragment: the byte offset of the `@` plus the run
/// of word characters between it and the cursor. Recomputed on every cursor
/// move; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MentionToken {
    pub start: usize,
    pub query: String,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Roster offered when preferences supply no companions, so the editor is
/// usable before the preferences wizard has run.
pub(crate) fn fallback_roster() -> Vec<Entity> {
    vec![Entity::new("Mom", "family"), Entity::new("Dad", "family")]
}

/// DOM selection offsets are UTF-16 code units; the rest of the editor works
/// in byte indices on char boundaries.
pub(crate) fn utf16_to_byte_idx(s: &str, pos_utf16: u32) -> usize {
    if pos_utf16 == 0 {
        return 0;
    }
    let mut acc: u32 = 0;
    for (i, ch) in s.char_indices() {
        let w = ch.len_utf16() as u32;
        if acc + w > pos_utf16 {
            return i;
        }
        acc += w;
        if acc == pos_utf16 {
            return i + ch.len_utf8();
        }
    }
    s.len()
}

pub(crate) fn byte_idx_to_utf16(s: &str, byte_idx: usize) -> u32 {
    s[..byte_idx.min(s.len())].encode_utf16().count() as u32
}

/// Find the mention token ending at `cursor` (a byte offset), if any.
///
/// Equivalent to matching `@(\w*)$` against `text[..cursor]`, with the extra
/// requirement that the character before the `@` (if any) is not a word
/// character. Never looks past the cursor, so a completed `@Name ` to the
/// left or an `@token` to the right of the cursor is not a match.
pub(crate) fn detect_mention(text: &str, cursor: usize) -> Option<MentionToken> {
    let cursor = cursor.min(text.len());
    let prefix = &text[..cursor];

    // Walk left over the query run.
    let mut start = None;
    for (i, ch) in prefix.char_indices().rev() {
        if ch == '@' {
            start = Some(i);
            break;
        }
        if !is_word_char(ch) {
            return None;
        }
    }
    let start = start?;

    // `@` mid-word (e.g. "mail@example") is an address, not a mention.
    if let Some(prev) = prefix[..start].chars().next_back() {
        if is_word_char(prev) {
            return None;
        }
    }

    Some(MentionToken {
        start,
        query: prefix[start + '@'.len_utf8()..].to_string(),
    })
}

/// Filter the roster by case-insensitive substring match on the name.
/// An empty query matches everything; roster order is preserved.
pub(crate) fn filter_roster(query: &str, roster: &[Entity]) -> Vec<Entity> {
    let q = query.to_lowercase();

    roster
        .iter()
        .filter(|e| q.is_empty() || e.name.to_lowercase().contains(&q))
        .take(MAX_MENTION_ITEMS)
        .cloned()
        .collect()
}

/// Replace the `@query` run ending at `cursor` with `@<name> ` and return the
/// new text plus the byte offset just after the inserted space.
///
/// Pure: no hidden state. When no token is active at `cursor` the input is
/// returned unchanged, which is what makes committing twice a no-op: right
/// after a commit the cursor sits past the trailing space, where detection
/// finds nothing.
pub(crate) fn commit_mention(text: &str, cursor: usize, entity: &Entity) -> (String, usize) {
    let cursor = cursor.min(text.len());

    let Some(token) = detect_mention(text, cursor) else {
        return (text.to_string(), cursor);
    };

    let mut next = String::with_capacity(text.len() + entity.name.len() + 2);
    next.push_str(&text[..token.start]);
    next.push('@');
    next.push_str(&entity.name);
    next.push(' ');
    let new_cursor = next.len();
    next.push_str(&text[cursor..]);

    (next, new_cursor)
}

/// Count of word-character runs, recomputed synchronously on every edit.
pub(crate) fn word_count(text: &str) -> usize {
    text.split(|c: char| !is_word_char(c))
        .filter(|w| !w.is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Entity> {
        vec![Entity::new("Mom", "family"), Entity::new("Dad", "family")]
    }

    #[test]
    fn test_detect_token_at_end_of_text() {
        let token = detect_mention("Hello @Mo", 9).expect("token expected");
        assert_eq!(token.start, 6);
        assert_eq!(token.query, "Mo");
    }

    #[test]
    fn test_detect_bare_at_yields_empty_query() {
        let token = detect_mention("Hi @", 4).expect("token expected");
        assert_eq!(token.start, 3);
        assert_eq!(token.query, "");
    }

    #[test]
    fn test_detect_nothing_without_at() {
        assert!(detect_mention("Hello world", 11).is_none());
    }

    #[test]
    fn test_detect_fails_across_whitespace() {
        // The space between `@Mom` and the cursor breaks the token.
        assert!(detect_mention("Hello @Mom ", 11).is_none());
    }

    #[test]
    fn test_detect_inside_word_run() {
        // Cursor right after "Mom", before the space: still inside the run.
        let text = "Hello @Mom friend";
        let token = detect_mention(text, 10).expect("token expected");
        assert_eq!(token.start, 6);
        assert_eq!(token.query, "Mom");

        // One past the space: no token.
        assert!(detect_mention(text, 11).is_none());
    }

    #[test]
    fn test_detect_mid_token_cursor_sees_partial_query() {
        // No lookahead: only the part left of the cursor counts.
        let token = detect_mention("Hello @Mom", 8).expect("token expected");
        assert_eq!(token.query, "M");
    }

    #[test]
    fn test_detect_rejects_email_like_at() {
        assert!(detect_mention("write me@example", 16).is_none());
    }

    #[test]
    fn test_detect_rejects_at_glued_to_previous_token() {
        // The second `@` sits right after a word character, so it reads as
        // part of the previous run, not a fresh mention.
        assert!(detect_mention("@a@b", 4).is_none());
    }

    #[test]
    fn test_detect_second_at_after_break_starts_fresh_token() {
        let token = detect_mention("hi @a @b", 8).expect("token expected");
        assert_eq!(token.start, 6);
        assert_eq!(token.query, "b");
    }

    #[test]
    fn test_detect_at_start_of_text() {
        let token = detect_mention("@Da", 3).expect("token expected");
        assert_eq!(token.start, 0);
        assert_eq!(token.query, "Da");
    }

    #[test]
    fn test_detect_ignores_text_right_of_cursor() {
        // An @mention fully to the right of the cursor is never detected.
        assert!(detect_mention("so then @Mom", 3).is_none());
    }

    #[test]
    fn test_detect_multibyte_text() {
        let text = "héllo @Jo";
        let token = detect_mention(text, text.len()).expect("token expected");
        assert_eq!(token.query, "Jo");
        assert_eq!(&text[token.start..token.start + 1], "@");
    }

    #[test]
    fn test_filter_empty_query_returns_full_roster_in_order() {
        let out = filter_roster("", &roster());
        assert_eq!(out, roster());
    }

    #[test]
    fn test_filter_case_insensitive_substring() {
        let out = filter_roster(
            "al",
            &[Entity::new("Alice", "friend"), Entity::new("Bob", "friend")],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Alice");
    }

    #[test]
    fn test_filter_substring_not_just_prefix() {
        let out = filter_roster("om", &roster());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Mom");
    }

    #[test]
    fn test_filter_preserves_roster_order() {
        let r = vec![
            Entity::new("Maria", "friend"),
            Entity::new("Mark", "brother"),
            Entity::new("Amara", "friend"),
        ];
        let out = filter_roster("ar", &r);
        let names: Vec<&str> = out.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Maria", "Mark", "Amara"]);
    }

    #[test]
    fn test_filter_caps_item_count() {
        let r: Vec<Entity> = (0..40)
            .map(|i| Entity::new(&format!("Friend{i}"), "friend"))
            .collect();
        assert_eq!(filter_roster("", &r).len(), MAX_MENTION_ITEMS);
        assert_eq!(filter_roster("friend", &r).len(), MAX_MENTION_ITEMS);
    }

    #[test]
    fn test_commit_replaces_partial_token() {
        let (text, cursor) = commit_mention("Hello @Mo", 9, &Entity::new("Mom", "family"));
        assert_eq!(text, "Hello @Mom ");
        assert_eq!(cursor, 11);
    }

    #[test]
    fn test_commit_preserves_text_after_cursor() {
        let (text, cursor) = commit_mention("Hi @D, hello", 5, &Entity::new("Dad", "family"));
        assert_eq!(text, "Hi @Dad , hello");
        assert_eq!(cursor, 8);
    }

    #[test]
    fn test_commit_on_bare_at() {
        let (text, cursor) = commit_mention("@", 1, &Entity::new("Mom", "family"));
        assert_eq!(text, "@Mom ");
        assert_eq!(cursor, 5);
    }

    #[test]
    fn test_commit_twice_is_noop() {
        let mom = Entity::new("Mom", "family");
        let (text, cursor) = commit_mention("Hello @Mo", 9, &mom);

        // After the commit the cursor sits past the trailing space, so no
        // token is active and a second commit changes nothing.
        assert!(detect_mention(&text, cursor).is_none());
        let (text2, cursor2) = commit_mention(&text, cursor, &mom);
        assert_eq!(text2, text);
        assert_eq!(cursor2, cursor);
    }

    #[test]
    fn test_full_scenario_detect_filter_commit() {
        let text = "Hello @Mo";
        let token = detect_mention(text, 9).expect("token expected");
        assert_eq!(token, MentionToken { start: 6, query: "Mo".to_string() });

        let candidates = filter_roster(&token.query, &roster());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Mom");

        let (next, cursor) = commit_mention(text, 9, &candidates[0]);
        assert_eq!(next, "Hello @Mom ");
        assert_eq!(cursor, 11);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n "), 0);
        assert_eq!(word_count("Dear Diary,"), 2);
        assert_eq!(word_count("Hello @Mom and @Dad!"), 4);
    }

    #[test]
    fn test_utf16_byte_roundtrip() {
        let s = "a😀b";
        // "😀" is 2 UTF-16 units / 4 UTF-8 bytes.
        assert_eq!(utf16_to_byte_idx(s, 0), 0);
        assert_eq!(utf16_to_byte_idx(s, 1), 1);
        assert_eq!(utf16_to_byte_idx(s, 3), 5);
        assert_eq!(utf16_to_byte_idx(s, 4), 6);
        assert_eq!(byte_idx_to_utf16(s, 5), 3);
        assert_eq!(byte_idx_to_utf16(s, s.len()), 4);
    }

    #[test]
    fn test_utf16_in_the_middle_of_surrogate_pair_snaps_to_boundary() {
        let s = "😀";
        // Offset 1 splits the surrogate pair; snap to the char start.
        assert_eq!(utf16_to_byte_idx(s, 1), 0);
    }
}
