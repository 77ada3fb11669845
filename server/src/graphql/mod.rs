mod nodes;

use async_graphql::{
    Context, EmptySubscription, Error, ErrorExtensions, ID, Object, Schema, SchemaBuilder,
    SimpleObject,
};
use platform_api::{ApiError, internal_error, parse_id};
use products_hr::{DepartmentSummary, ErrorKind, Hr, HrError, SeaOrmStore};
use serde::Serialize;
use tracing::instrument;

use nodes::{DepartmentInput, DepartmentNode, EmployeeInput, EmployeeNode};

pub type HrService = Hr<SeaOrmStore>;
pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Schema without data attached; enough for SDL export.
pub fn schema_builder() -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
}

pub fn build_schema(hr: HrService) -> SchemaType {
    schema_builder().data(hr).finish()
}

fn hr<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a HrService> {
    ctx.data::<HrService>()
        .map_err(|_| internal_error(anyhow::anyhow!("hr service missing from schema data")))
}

fn api_error(err: HrError) -> Error {
    let api = match err.kind() {
        ErrorKind::NotFound => ApiError::NotFound(err.to_string()),
        ErrorKind::Conflict => ApiError::Conflict(err.to_string()),
        ErrorKind::Validation => ApiError::InvalidInput(err.to_string()),
        ErrorKind::Internal => ApiError::internal(err.into()),
    };
    api.extend()
}

fn id_arg(id: &ID) -> async_graphql::Result<i32> {
    parse_id(id).map_err(|err| err.extend())
}

async fn department_node(hr: &HrService, id: i32) -> async_graphql::Result<DepartmentNode> {
    let department = hr.directory().get_by_id(id).await.map_err(api_error)?;
    let count = hr
        .aggregation()
        .count_employees_in_department(&department)
        .await
        .map_err(api_error)?;
    Ok(DepartmentSummary::new(department, count).into())
}

async fn employee_node(hr: &HrService, id: i32) -> async_graphql::Result<Option<EmployeeNode>> {
    let view = hr.aggregation().employee_view(id).await.map_err(api_error)?;
    Ok(view.map(EmployeeNode::from))
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.health", skip_all)]
    async fn health(&self) -> HealthPayload {
        HealthPayload { ok: true }
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    #[instrument(name = "graphql.departments", skip_all)]
    async fn departments(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<DepartmentNode>> {
        let summaries = hr(ctx)?
            .aggregation()
            .department_summaries()
            .await
            .map_err(api_error)?;
        Ok(summaries.into_iter().map(DepartmentNode::from).collect())
    }

    #[instrument(name = "graphql.department", skip(self, ctx))]
    async fn department(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<DepartmentNode> {
        department_node(hr(ctx)?, id_arg(&id)?).await
    }

    #[instrument(name = "graphql.employees", skip_all)]
    async fn employees(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<EmployeeNode>> {
        let views = hr(ctx)?
            .aggregation()
            .employee_views()
            .await
            .map_err(api_error)?;
        Ok(views.into_iter().map(EmployeeNode::from).collect())
    }

    #[instrument(name = "graphql.employee", skip(self, ctx))]
    async fn employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<EmployeeNode>> {
        employee_node(hr(ctx)?, id_arg(&id)?).await
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    #[graphql(name = "createDepartment")]
    async fn create_department(
        &self,
        ctx: &Context<'_>,
        input: DepartmentInput,
    ) -> async_graphql::Result<DepartmentNode> {
        let created = hr(ctx)?
            .directory()
            .create(input.into())
            .await
            .map_err(api_error)?;
        Ok(DepartmentSummary::new(created, 0).into())
    }

    #[graphql(name = "updateDepartment")]
    async fn update_department(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: DepartmentInput,
    ) -> async_graphql::Result<DepartmentNode> {
        let hr = hr(ctx)?;
        let updated = hr
            .directory()
            .update(id_arg(&id)?, input.into())
            .await
            .map_err(api_error)?;
        department_node(hr, updated.id).await
    }

    #[graphql(name = "deleteDepartment")]
    async fn delete_department(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        hr(ctx)?
            .directory()
            .delete(id_arg(&id)?)
            .await
            .map_err(api_error)?;
        Ok(true)
    }

    #[graphql(name = "createEmployee")]
    async fn create_employee(
        &self,
        ctx: &Context<'_>,
        input: EmployeeInput,
    ) -> async_graphql::Result<EmployeeNode> {
        let hr = hr(ctx)?;
        let draft = input.into_draft().map_err(|err| err.extend())?;
        let created = hr.registry().create(draft).await.map_err(api_error)?;
        employee_node(hr, created.id)
            .await?
            .ok_or_else(|| internal_error(anyhow::anyhow!("employee {} vanished", created.id)))
    }

    #[graphql(name = "updateEmployee")]
    async fn update_employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: EmployeeInput,
    ) -> async_graphql::Result<EmployeeNode> {
        let hr = hr(ctx)?;
        let draft = input.into_draft().map_err(|err| err.extend())?;
        let updated = hr
            .registry()
            .update(id_arg(&id)?, draft)
            .await
            .map_err(api_error)?;
        employee_node(hr, updated.id)
            .await?
            .ok_or_else(|| internal_error(anyhow::anyhow!("employee {} vanished", updated.id)))
    }

    #[graphql(name = "deleteEmployee")]
    async fn delete_employee(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        hr(ctx)?
            .registry()
            .delete(id_arg(&id)?)
            .await
            .map_err(api_error)?;
        Ok(true)
    }
}

#[derive(Clone, Debug, SimpleObject, Serialize)]
pub struct HealthPayload {
    pub ok: bool,
}
