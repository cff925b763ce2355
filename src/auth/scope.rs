//! Ordered scope lists requested during authorization.

// std
use std::slice::Iter;
// self
use crate::_prelude::*;

/// Separator the service expects between scope entries.
pub const SCOPE_DELIMITER: &str = ",";

/// Ordered list of permissions requested during authorization.
///
/// Unlike a set, order is preserved and duplicates are kept: the list is joined exactly as
/// supplied. A plain string converts into a single entry, so `"a,b"` and `["a", "b"]` render
/// the same query value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(Vec<String>);
impl Scope {
	/// Creates a scope list from any iterator of strings.
	pub fn new<I, S>(scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self(scopes.into_iter().map(Into::into).collect())
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no entries are defined.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterator over entries in request order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Joins the entries with [`SCOPE_DELIMITER`] without a trailing separator.
	pub fn joined(&self) -> String {
		self.0.join(SCOPE_DELIMITER)
	}
}
impl Display for Scope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.joined())
	}
}
impl From<&str> for Scope {
	fn from(value: &str) -> Self {
		Self(vec![value.to_owned()])
	}
}
impl From<String> for Scope {
	fn from(value: String) -> Self {
		Self(vec![value])
	}
}
impl From<Vec<String>> for Scope {
	fn from(value: Vec<String>) -> Self {
		Self(value)
	}
}
impl From<Vec<&str>> for Scope {
	fn from(value: Vec<&str>) -> Self {
		Self::new(value)
	}
}
impl From<&[&str]> for Scope {
	fn from(value: &[&str]) -> Self {
		Self::new(value.iter().copied())
	}
}
impl<const N: usize> From<[&str; N]> for Scope {
	fn from(value: [&str; N]) -> Self {
		Self::new(value)
	}
}
impl<'a> IntoIterator for &'a Scope {
	type IntoIter = Iter<'a, String>;
	type Item = &'a String;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn sequence_joins_in_order_without_trailing_delimiter() {
		let scope = Scope::from(["ManagePeople", "ManageGroups", "ManageCalendar"]);

		assert_eq!(scope.joined(), "ManagePeople,ManageGroups,ManageCalendar");
		assert_eq!(scope.len(), 3);
	}

	#[test]
	fn sequence_and_pre_joined_string_render_identically() {
		let entries = vec!["ManageSongs", "ManagePeople", "ManageSongs"];
		let from_list = Scope::from(entries.clone());
		let from_string = Scope::from(entries.join(","));

		assert_eq!(from_list.joined(), from_string.joined());
		assert_eq!(from_list.to_string(), "ManageSongs,ManagePeople,ManageSongs");
	}

	#[test]
	fn empty_scope_renders_empty_string() {
		let scope = Scope::default();

		assert!(scope.is_empty());
		assert_eq!(scope.joined(), "");
	}

	#[test]
	fn iteration_preserves_order() {
		let scope = Scope::new(["b", "a"]);
		let collected = scope.iter().collect::<Vec<_>>();
		let via_ref = (&scope).into_iter().map(String::as_str).collect::<Vec<_>>();

		assert_eq!(collected, ["b", "a"]);
		assert_eq!(via_ref, collected);
	}
}
