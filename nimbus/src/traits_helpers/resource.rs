use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{HandlerFn, HandlerResult};
use crate::http_helpers::{HttpMethod, HttpRequest, HttpResponse};
use crate::router::PathParams;

pub type ResourceMethod<R> = fn(&R, &HttpRequest, &mut HttpResponse, &PathParams) -> HandlerResult;

/// An object serving several verbs on one path.
///
/// Implementors list the verbs they serve once; the table is frozen when the
/// resource is registered and a verb without an entry answers 405.
///
/// ```rust
/// use nimbus::{HandlerResult, HttpRequest, HttpResponse, MethodTable, PathParams, Resource};
///
/// struct Books;
///
/// impl Books {
///     fn post(&self, _req: &HttpRequest, resp: &mut HttpResponse, _: &PathParams) -> HandlerResult {
///         resp.set_text("Endpoint to create a book");
///         Ok(())
///     }
/// }
///
/// impl Resource for Books {
///     fn methods(table: &mut MethodTable<Self>) {
///         table.post(Self::post);
///     }
/// }
/// ```
pub trait Resource: Send + Sync + Sized + 'static {
    fn methods(table: &mut MethodTable<Self>);
}

pub struct MethodTable<R> {
    entries: Vec<(HttpMethod, ResourceMethod<R>)>,
}

impl<R> MethodTable<R> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Bind `operation` to `method`; a later binding for the same verb wins.
    pub fn on(&mut self, method: HttpMethod, operation: ResourceMethod<R>) -> &mut Self {
        self.entries.retain(|(existing, _)| *existing != method);
        self.entries.push((method, operation));
        self
    }

    pub fn get(&mut self, operation: ResourceMethod<R>) -> &mut Self {
        self.on(HttpMethod::GET, operation)
    }

    pub fn post(&mut self, operation: ResourceMethod<R>) -> &mut Self {
        self.on(HttpMethod::POST, operation)
    }

    pub fn put(&mut self, operation: ResourceMethod<R>) -> &mut Self {
        self.on(HttpMethod::PUT, operation)
    }

    pub fn patch(&mut self, operation: ResourceMethod<R>) -> &mut Self {
        self.on(HttpMethod::PATCH, operation)
    }

    pub fn delete(&mut self, operation: ResourceMethod<R>) -> &mut Self {
        self.on(HttpMethod::DELETE, operation)
    }

    pub fn head(&mut self, operation: ResourceMethod<R>) -> &mut Self {
        self.on(HttpMethod::HEAD, operation)
    }

    pub fn options(&mut self, operation: ResourceMethod<R>) -> &mut Self {
        self.on(HttpMethod::OPTIONS, operation)
    }
}

/// A resource with its verb table bound to a shared instance.
pub struct ResourceHandler {
    name: &'static str,
    operations: FxHashMap<HttpMethod, HandlerFn>,
}

impl ResourceHandler {
    pub fn new<R: Resource>(resource: R) -> Self {
        let resource = Arc::new(resource);
        let mut table = MethodTable::new();
        R::methods(&mut table);

        let operations = table
            .entries
            .into_iter()
            .map(|(method, operation)| {
                let resource = resource.clone();
                let bound: HandlerFn = Arc::new(
                    move |req: &HttpRequest, resp: &mut HttpResponse, params: &PathParams| {
                        operation(&resource, req, resp, params)
                    },
                );
                (method, bound)
            })
            .collect();

        Self {
            name: std::any::type_name::<R>(),
            operations,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn operation(&self, method: HttpMethod) -> Option<&HandlerFn> {
        self.operations.get(&method)
    }

    pub fn supports(&self, method: HttpMethod) -> bool {
        self.operations.contains_key(&method)
    }
}
