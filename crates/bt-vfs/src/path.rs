//! Path helpers shared by the VFS backends.

use std::borrow::Cow;

fn is_normalized(path: &str) -> bool {
    path.starts_with('/') && !(path.len() > 1 && path.ends_with('/')) && !path.contains("//")
}

/// Normalize a path: leading `/`, no repeated `/`, no trailing `/` except for
/// the root. Borrows when the input is already normal.
///
/// `.` and `..` are left alone; callers that take user input must reject
/// them before building a path.
pub fn normalize(path: &str) -> Cow<'_, str> {
    if is_normalized(path) {
        return Cow::Borrowed(path);
    }
    let mut result = String::with_capacity(path.len() + 1);
    result.push('/');
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if result.len() > 1 {
            result.push('/');
        }
        result.push_str(segment);
    }
    Cow::Owned(result)
}

/// Parent of a normalized path. The root is its own parent.
pub(crate) fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &path[..i],
    }
}

/// Join a directory and a child name into a normalized path.
pub fn join(dir: &str, name: &str) -> String {
    let dir = normalize(dir);
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}
