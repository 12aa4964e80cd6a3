// Pull Requests module
pub mod get_pull_request_reviews;

pub use get_pull_request_reviews::{
    GetPullRequestReviewsArgs, describe_pull_request_reviews, get_pull_request_reviews,
};
