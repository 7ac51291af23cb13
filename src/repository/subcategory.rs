use diesel::prelude::*;

use crate::domain::subcategory::{NewSubcategory, Subcategory};
use crate::domain::types::CategoryId;
use crate::models::subcategory::{NewSubcategory as DbNewSubcategory, Subcategory as DbSubcategory};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, SubcategoryReader, SubcategoryWriter};

impl SubcategoryReader for DieselRepository {
    fn list_subcategories(&self, category_id: CategoryId) -> RepositoryResult<Vec<Subcategory>> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let items = subcategories::table
            .filter(subcategories::category_id.eq(category_id.get()))
            .order(subcategories::name.asc())
            .load::<DbSubcategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Subcategory>, _>>()?;

        Ok(items)
    }

    fn get_subcategory_by_slug(
        &self,
        category_id: CategoryId,
        slug: &str,
    ) -> RepositoryResult<Option<Subcategory>> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let subcategory = subcategories::table
            .filter(subcategories::category_id.eq(category_id.get()))
            .filter(subcategories::slug.eq(slug))
            .first::<DbSubcategory>(&mut conn)
            .optional()?;

        let subcategory = subcategory.map(TryInto::try_into).transpose()?;
        Ok(subcategory)
    }
}

impl SubcategoryWriter for DieselRepository {
    fn create_subcategory(&self, subcategory: &NewSubcategory) -> RepositoryResult<usize> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;
        let db_subcategory: DbNewSubcategory = subcategory.clone().into();

        let affected = diesel::insert_into(subcategories::table)
            .values(db_subcategory)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
