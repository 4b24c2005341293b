use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{parse_macro_input, ItemFn, LitStr};

/// Attribute macro to mark a function as an MCP tool.
///
/// Validates the tool metadata at compile time and emits two constants next to
/// the function, `<FN>_TOOL_NAME` and `<FN>_TOOL_DESCRIPTION`, so the tool
/// implementation and its logging share a single source for the public name.
///
/// Usage:
/// ```rust,ignore
/// #[mcp_tool(name = "listTeams", description = "List teams of a project")]
/// pub async fn list_teams(
///     api: &dyn AzureDevOpsApi,
///     ctx: &ToolContext,
///     args: ListTeamsArgs,
/// ) -> Result<CallToolResult, McpError> {
///     log::info!("Tool invoked: {}", LIST_TEAMS_TOOL_NAME);
///     // implementation
/// }
/// ```
#[proc_macro_attribute]
pub fn mcp_tool(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut name: Option<LitStr> = None;
    let mut description: Option<LitStr> = None;

    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            name = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("description") {
            description = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported mcp_tool property, expected `name` or `description`"))
        }
    });
    parse_macro_input!(attr with parser);

    let input_fn = parse_macro_input!(item as ItemFn);

    let (Some(name), Some(description)) = (name, description) else {
        return syn::Error::new(
            Span::call_site(),
            "mcp_tool attribute requires both 'name' and 'description' parameters",
        )
        .to_compile_error()
        .into();
    };

    if name.value().trim().is_empty() {
        return syn::Error::new(name.span(), "mcp_tool name cannot be empty")
            .to_compile_error()
            .into();
    }

    if input_fn.sig.asyncness.is_none() {
        return syn::Error::new_spanned(&input_fn.sig.fn_token, "mcp_tool functions must be async")
            .to_compile_error()
            .into();
    }

    let fn_name = input_fn.sig.ident.to_string().to_uppercase();
    let name_const = format_ident!("{}_TOOL_NAME", fn_name);
    let description_const = format_ident!("{}_TOOL_DESCRIPTION", fn_name);
    let vis = &input_fn.vis;

    TokenStream::from(quote! {
        /// Public MCP name of the tool.
        #vis const #name_const: &str = #name;
        /// Description advertised for the tool.
        #vis const #description_const: &str = #description;

        #input_fn
    })
}
