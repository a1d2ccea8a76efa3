use crate::utils::DbPool;
use cleanjob_utils::error::CleanJobResult;

pub trait Crud: Sized {
  type InsertForm;
  type UpdateForm;
  type IdType;

  async fn create(pool: &DbPool, form: &Self::InsertForm) -> CleanJobResult<Self>;

  async fn read(pool: &DbPool, id: Self::IdType) -> CleanJobResult<Self>;

  async fn update(pool: &DbPool, id: Self::IdType, form: &Self::UpdateForm)
    -> CleanJobResult<Self>;
}
