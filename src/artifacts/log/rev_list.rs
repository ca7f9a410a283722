use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// First-parent history starting at a commit, newest first.
///
/// Ends after the root commit. A commit that cannot be loaded is yielded as an
/// error once, after which the walk stops.
#[derive(Clone)]
pub struct RevList<'r> {
    database: &'r Database,
    current_commit_oid: Option<ObjectId>,
}

impl<'r> RevList<'r> {
    pub fn new(database: &'r Database, start_oid: ObjectId) -> Self {
        RevList {
            database,
            current_commit_oid: Some(start_oid),
        }
    }
}

impl Iterator for RevList<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                // Move to the first parent for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::Author;
    use crate::artifacts::objects::object_type::ObjectType;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn commit(database: &Database, parents: Vec<ObjectId>, message: &str) -> ObjectId {
        let tree_oid = database.write(ObjectType::Tree, b"").unwrap();
        let author = Author::new("Walker".to_string(), "walker@example.com".to_string());
        let commit = Commit::new(parents, tree_oid, author, message.to_string());
        database.store(&commit).unwrap()
    }

    #[test]
    fn walk_follows_first_parents_only() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        let root = commit(&database, vec![], "root");
        let main = commit(&database, vec![root.clone()], "main work");
        let side = commit(&database, vec![root.clone()], "side work");
        let merge = commit(&database, vec![main.clone(), side], "merge");

        let messages = RevList::new(&database, merge)
            .map(|entry| entry.map(|(_, commit)| commit.message().to_string()))
            .collect::<anyhow::Result<Vec<_>>>()?;

        assert_eq!(messages, vec!["merge", "main work", "root"]);
        Ok(())
    }

    #[test]
    fn missing_commits_end_the_walk_with_an_error() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        let missing = ObjectId::try_parse("d".repeat(40))?;

        let mut walk = RevList::new(&database, missing);

        assert!(walk.next().is_some_and(|entry| entry.is_err()));
        assert!(walk.next().is_none());
        Ok(())
    }
}
