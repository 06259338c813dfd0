use crate::ast;
use crate::execution::ExecutionEngine;
use crate::fragment_typemap::FragmentTypeMap;
use crate::fragment_typemap::FragmentTypeMapBuildError;
use crate::requester::AutoRequester;
use crate::requester::AutoRequesterError;
use crate::requester::LocalSpawnScheduler;
use crate::requester::RequesterShared;
use crate::requester::Scheduler;
use crate::schema::Schema;
use std::any::Any;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug)]
enum PreloadSource {
    Ast(Option<PathBuf>, ast::query::Document),
    File(PathBuf),
    Str(Option<PathBuf>, String),
}

/// Configures an [`AutoRequester`].
///
/// Preload fragment sources may be added any number of times; they are
/// validated together, as one document, by [`build`](Self::build).
pub struct AutoRequesterBuilder {
    context: Option<Rc<dyn Any>>,
    engine: Box<dyn ExecutionEngine>,
    preload_sources: Vec<PreloadSource>,
    scheduler: Box<dyn Scheduler>,
    schema: Schema,
}
impl AutoRequesterBuilder {
    pub fn build(self) -> Result<AutoRequester, AutoRequesterError> {
        let fragment_typemap = self.build_fragment_typemap()?;
        tracing::debug!(
            preloaded_types = fragment_typemap.len(),
            query_type = self.schema.query_type_name(),
            "built auto-requester"
        );
        AutoRequester::from_shared(Rc::new(RequesterShared::new(
            self.schema,
            fragment_typemap,
            self.engine,
            self.scheduler,
            self.context,
        )))
    }

    fn build_fragment_typemap(&self) -> Result<FragmentTypeMap, FragmentTypeMapBuildError> {
        let mut typemap_builder = FragmentTypeMap::builder(&self.schema);
        for source in &self.preload_sources {
            typemap_builder = match source {
                PreloadSource::Ast(file_path, doc) =>
                    typemap_builder.load_ast(file_path.clone(), doc)?,
                PreloadSource::File(file_path) =>
                    typemap_builder.load_file(file_path)?,
                PreloadSource::Str(file_path, content) =>
                    typemap_builder.load_str(file_path.clone(), content)?,
            };
        }
        typemap_builder.build()
    }

    /// An opaque value handed to the execution engine with every request
    /// (see [`ExecutionRequest::context`](crate::execution::ExecutionRequest::context)).
    pub fn context(mut self, context: impl Any) -> Self {
        self.context = Some(Rc::new(context));
        self
    }

    pub fn new(schema: Schema, engine: impl ExecutionEngine + 'static) -> Self {
        Self {
            context: None,
            engine: Box::new(engine),
            preload_sources: vec![],
            scheduler: Box::new(LocalSpawnScheduler),
            schema,
        }
    }

    pub fn preload_fragments_ast(
        mut self,
        file_path: Option<PathBuf>,
        doc: ast::query::Document,
    ) -> Self {
        self.preload_sources.push(PreloadSource::Ast(file_path, doc));
        self
    }

    pub fn preload_fragments_file(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.preload_sources.push(PreloadSource::File(file_path.into()));
        self
    }

    pub fn preload_fragments_str(mut self, content: impl Into<String>) -> Self {
        self.preload_sources.push(PreloadSource::Str(None, content.into()));
        self
    }

    pub fn scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }
}
