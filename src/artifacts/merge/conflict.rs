pub const CONFLICT_START: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_MID: &str = "=======\n";
pub const CONFLICT_END: &str = ">>>>>>> MERGE_HEAD\n";

/// Working file content for a conflicted path.
///
/// A side without an entry contributes empty content. Content is copied
/// verbatim, so a side lacking a final newline runs into the following marker.
pub fn render_conflict(head: &[u8], target: &[u8]) -> Vec<u8> {
    let mut rendered = Vec::with_capacity(
        CONFLICT_START.len() + head.len() + CONFLICT_MID.len() + target.len() + CONFLICT_END.len(),
    );

    rendered.extend_from_slice(CONFLICT_START.as_bytes());
    rendered.extend_from_slice(head);
    rendered.extend_from_slice(CONFLICT_MID.as_bytes());
    rendered.extend_from_slice(target);
    rendered.extend_from_slice(CONFLICT_END.as_bytes());

    rendered
}
