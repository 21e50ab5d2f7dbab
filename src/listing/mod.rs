mod filter;
mod paginate;
mod view;

pub use self::{
    filter::{FilterCriteria, SearchPolicy, apply_filters},
    paginate::{PageResult, paginate, total_pages},
    view::ViewModel,
};
