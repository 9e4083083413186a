//! Person → Book loading. Applied the same way to lists and single reads.

use crate::db::Database;
use crate::error::AppError;
use crate::model::{Book, Person};
use crate::service::CrudService;
use std::collections::HashMap;

/// Fill `books` on every person with their live books, in one query.
pub async fn attach_books(db: &Database, people: &mut [Person]) -> Result<(), AppError> {
    let ids: Vec<i64> = people.iter().map(|p| p.id).collect();
    let books: Vec<Book> = CrudService::fetch_where_any(db, "person_id", &ids).await?;
    let mut by_owner = group_by_owner(books);
    for person in people.iter_mut() {
        person.books = by_owner.remove(&person.id).unwrap_or_default();
    }
    Ok(())
}

fn group_by_owner(books: Vec<Book>) -> HashMap<i64, Vec<Book>> {
    books.into_iter().fold(HashMap::new(), |mut m, b| {
        if let Some(owner) = b.person_id {
            m.entry(owner).or_default().push(b);
        }
        m
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn book(id: i64, owner: Option<i64>) -> Book {
        let now = Utc::now();
        Book {
            id,
            title: format!("t{}", id),
            author: "a".into(),
            call_number: id as i32,
            person_id: owner,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn groups_keep_order_and_skip_unowned() {
        let grouped = group_by_owner(vec![book(1, Some(7)), book(2, None), book(3, Some(7)), book(4, Some(8))]);
        let ids: Vec<i64> = grouped[&7].iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(grouped[&8].len(), 1);
        assert_eq!(grouped.len(), 2);
    }
}
