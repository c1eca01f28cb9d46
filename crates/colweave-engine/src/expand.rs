//! Template expansion.
//!
//! [`ArgsDictBuilder`] ties the pieces together: parse a template, transform
//! every match, combine the groups into tuples, then render one output name
//! per tuple. The result is an [`ArgsDict`] whose iteration order is the
//! order the columns were declared in.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::combine::GroupCombiner;
use crate::config::Config;
use crate::error::ExpandError;
use crate::template::TemplateParser;
use crate::token::Match;
use crate::transform::TransformPipeline;

/// One argument tuple: one [`Match`] per placeholder, in placeholder order.
pub type ArgTuple = Vec<Match>;

/// Ordered mapping from rendered output-column name to its argument tuple.
///
/// Duplicate names keep their first position and take the latest tuple.
pub type ArgsDict = IndexMap<String, ArgTuple>;

/// Expands templates into ordered argument dictionaries.
#[derive(Debug, Clone)]
pub struct ArgsDictBuilder {
    parser: TemplateParser,
    transform: TransformPipeline,
    combiner: Arc<dyn GroupCombiner>,
}

impl ArgsDictBuilder {
    #[must_use]
    pub fn new(
        parser: TemplateParser,
        transform: TransformPipeline,
        combiner: Arc<dyn GroupCombiner>,
    ) -> Self {
        ArgsDictBuilder {
            parser,
            transform,
            combiner,
        }
    }

    /// Builder using the parser, transform pipeline and group combiner from
    /// `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        ArgsDictBuilder {
            parser: config.parser.clone(),
            transform: config.match_transform.clone(),
            combiner: Arc::clone(&config.new_col_combiner),
        }
    }

    /// Expands `template` into its argument dictionary.
    pub fn build(&self, template: &str) -> Result<ArgsDict, ExpandError> {
        let (skeleton, groups) = self.parser.parse(template)?;

        let groups = groups
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|m| self.transform.transform(m))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut args = ArgsDict::new();
        for tuple in self.combiner.combine(groups) {
            let names: Vec<String> = tuple.iter().map(Match::display_name).collect();
            args.insert(skeleton.render(&names), tuple);
        }
        Ok(args)
    }
}

impl Default for ArgsDictBuilder {
    fn default() -> Self {
        ArgsDictBuilder::from_config(&Config::default())
    }
}

/// Expands `template` with the default configuration.
///
/// Shorthand for [`expand_template_with`] and a default [`Config`].
pub fn expand_template(template: &str) -> Result<ArgsDict, ExpandError> {
    expand_template_with(template, &Config::default())
}

/// Expands `template` with an explicit configuration.
pub fn expand_template_with(template: &str, config: &Config) -> Result<ArgsDict, ExpandError> {
    ArgsDictBuilder::from_config(config).build(template)
}
