mod item;
mod loader;
mod store;

pub use self::{
    item::{Category, ContentItem, SeoMeta, UnknownCategory},
    loader::{Content, ItemBuilder, NoContent, load_dir},
    store::{CategoryCount, ContentStore},
};

#[cfg(test)]
pub(crate) use self::store::tests::item as test_item;
