use super::CommandHandler;
use crate::view::{FilterCriteria, SortMode};
use crate::{Notebook, Result};
use std::fmt::{self, Write as _};

/// Changes to the session's criteria; `None` keeps the saved value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriteriaChange {
    pub query: Option<String>,
    pub favorites: Option<bool>,
    pub min_rating: Option<f64>,
    pub unrated: Option<bool>,
    pub rated: Option<bool>,
    pub sort: Option<SortMode>,
}

impl CriteriaChange {
    pub fn apply(&self, criteria: &mut FilterCriteria) {
        if let Some(query) = &self.query {
            criteria.query = query.trim().to_string();
        }
        if let Some(favorites) = self.favorites {
            criteria.favorites_only = favorites;
        }
        if let Some(min) = self.min_rating {
            criteria.min_external_rating = Some(min).filter(|m| *m != 0.0);
        }
        if let Some(unrated) = self.unrated {
            criteria.externally_unrated_only = unrated;
        }
        if let Some(rated) = self.rated {
            criteria.has_user_rating = rated;
        }
        if let Some(sort) = self.sort {
            criteria.sort = sort;
        }
    }
}

pub enum FilterCommand {
    Show,
    Set(CriteriaChange),
    Clear,
}

impl CommandHandler for FilterCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        match self {
            FilterCommand::Show => {}
            FilterCommand::Set(change) => {
                let mut criteria = notebook.criteria().clone();
                change.apply(&mut criteria);
                notebook.set_criteria(criteria);
            }
            FilterCommand::Clear => notebook.reset_criteria(),
        }
        print!("{}", describe(notebook.criteria()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "filter"
    }
}

/// Human-readable summary of the criteria
pub fn describe(criteria: &FilterCriteria) -> String {
    let mut out = String::new();
    let written = write_description(&mut out, criteria);
    debug_assert!(written.is_ok(), "writing to a String cannot fail");
    out
}

fn write_description(out: &mut String, criteria: &FilterCriteria) -> fmt::Result {
    let query = if criteria.query.is_empty() {
        "-"
    } else {
        criteria.query.as_str()
    };

    writeln!(out, "Search:          {}", query)?;
    writeln!(out, "Favorites only:  {}", yes_no(criteria.favorites_only))?;
    match criteria.threshold() {
        Some(min) => writeln!(out, "Min Untappd:     {}", min)?,
        None => writeln!(out, "Min Untappd:     -")?,
    }
    writeln!(
        out,
        "Untappd unrated: {}",
        yes_no(criteria.externally_unrated_only)
    )?;
    writeln!(out, "Rated by me:     {}", yes_no(criteria.has_user_rating))?;
    writeln!(out, "Sort:            {}", criteria.sort)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
