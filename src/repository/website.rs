use diesel::prelude::*;

use crate::domain::recommendation::{NewWebsite, Scored, Website};
use crate::domain::types::{TypeConstraintError, WebsiteId};
use crate::models::website::{NewWebsite as DbNewWebsite, Website as DbWebsite};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DieselRepository, RecommendationListQuery, WebsiteReader, WebsiteWriter, sort_by_votes,
    sort_newest_first, vote,
};

impl WebsiteReader for DieselRepository {
    fn list_websites(
        &self,
        query: &RecommendationListQuery,
    ) -> RepositoryResult<Vec<Scored<Website>>> {
        use crate::schema::websites;

        let mut conn = self.conn()?;

        let mut items = websites::table
            .filter(websites::subcategory_id.eq(query.subcategory_id.get()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        // A keyword search replaces the ranked view, so the calendar window
        // only applies when no search is active.
        if query.search.is_none() {
            if let Some((start, end)) = query.filter.window(query.now) {
                items = items
                    .filter(websites::created_at.ge(start))
                    .filter(websites::created_at.lt(end));
            }
        }

        let rows = items.load::<DbWebsite>(&mut conn)?;

        let rows: Vec<DbWebsite> = match &query.search {
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
        let totals = vote::website::totals(&mut conn, &ids)?;

        let mut scored = rows
            .into_iter()
            .map(|row| {
                let total_votes = totals.get(&row.id).copied().unwrap_or(0);
                Ok(Scored {
                    item: row.try_into()?,
                    total_votes,
                })
            })
            .collect::<Result<Vec<Scored<Website>>, TypeConstraintError>>()?;

        if query.search.is_none() && query.filter.ranks_by_votes() {
            sort_by_votes(&mut scored, |website| {
                (website.created_at, website.id.get())
            });
        } else {
            sort_newest_first(&mut scored, |website| {
                (website.created_at, website.id.get())
            });
        }

        Ok(scored)
    }

    fn get_website_by_id(&self, id: WebsiteId) -> RepositoryResult<Option<Website>> {
        use crate::schema::websites;

        let mut conn = self.conn()?;

        let website = websites::table
            .filter(websites::id.eq(id.get()))
            .first::<DbWebsite>(&mut conn)
            .optional()?;

        let website = website.map(TryInto::try_into).transpose()?;
        Ok(website)
    }
}

impl WebsiteWriter for DieselRepository {
    fn create_website(&self, website: &NewWebsite) -> RepositoryResult<usize> {
        use crate::schema::websites;

        let mut conn = self.conn()?;
        let db_website: DbNewWebsite = website.clone().into();

        let affected = diesel::insert_into(websites::table)
            .values(db_website)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
