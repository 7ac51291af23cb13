use diesel::prelude::*;

use crate::domain::recommendation::{Book, NewBook, Scored};
use crate::domain::types::{BookId, TypeConstraintError};
use crate::models::book::{Book as DbBook, NewBook as DbNewBook};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BookReader, BookWriter, DieselRepository, RecommendationListQuery, sort_by_votes,
    sort_newest_first, vote,
};

impl BookReader for DieselRepository {
    fn list_books(&self, query: &RecommendationListQuery) -> RepositoryResult<Vec<Scored<Book>>> {
        use crate::schema::books;

        let mut conn = self.conn()?;

        let mut items = books::table
            .filter(books::subcategory_id.eq(query.subcategory_id.get()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if query.search.is_none() {
            if let Some((start, end)) = query.filter.window(query.now) {
                items = items
                    .filter(books::created_at.ge(start))
                    .filter(books::created_at.lt(end));
            }
        }

        let rows = items.load::<DbBook>(&mut conn)?;

        let rows: Vec<DbBook> = match &query.search {
            Some(term) => {
                let needle = term.to_lowercase();
                rows.into_iter()
                    .filter(|row| {
                        row.title.to_lowercase().contains(&needle)
                            || row.description.to_lowercase().contains(&needle)
                    })
                    .collect()
            }
            None => rows,
        };

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let totals = vote::book::totals(&mut conn, &ids)?;

        let mut scored = rows
            .into_iter()
            .map(|row| {
                let total_votes = totals.get(&row.id).copied().unwrap_or(0);
                Ok(Scored {
                    item: row.try_into()?,
                    total_votes,
                })
            })
            .collect::<Result<Vec<Scored<Book>>, TypeConstraintError>>()?;

        if query.search.is_none() && query.filter.ranks_by_votes() {
            sort_by_votes(&mut scored, |book| (book.created_at, book.id.get()));
        } else {
            sort_newest_first(&mut scored, |book| (book.created_at, book.id.get()));
        }

        Ok(scored)
    }

    fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<Book>> {
        use crate::schema::books;

        let mut conn = self.conn()?;

        let book = books::table
            .filter(books::id.eq(id.get()))
            .first::<DbBook>(&mut conn)
            .optional()?;

        let book = book.map(TryInto::try_into).transpose()?;
        Ok(book)
    }
}

impl BookWriter for DieselRepository {
    fn create_book(&self, book: &NewBook) -> RepositoryResult<usize> {
        use crate::schema::books;

        let mut conn = self.conn()?;
        let db_book: DbNewBook = book.clone().into();

        let affected = diesel::insert_into(books::table)
            .values(db_book)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
