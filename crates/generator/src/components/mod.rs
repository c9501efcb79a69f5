mod ad_slot;
mod article;
mod page;

pub use ad_slot::AdSlot;
pub use article::Article;
pub use page::{MANIFEST_PATH, Page, SocialLinks, page_title};
