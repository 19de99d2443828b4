use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    MetaNameValue,
    Result,
    Token,
};

/// The tags of the `error` attribute.
#[derive(Debug, Default)]
pub struct ErrorArgs {
    pub message: Option<Expr>,
    pub labels: Option<Expr>,
    pub help: Option<Expr>,
}

impl ErrorArgs {
    /// Reads the tags out of `#[error(tag = expr, ...)]`.
    fn from_attribute(attr: &Attribute) -> Result<Self> {
        let pairs = attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?;
        let mut args = Self::default();

        for pair in pairs {
            let slot = if pair.path.is_ident("message") {
                &mut args.message
            } else if pair.path.is_ident("labels") {
                &mut args.labels
            } else if pair.path.is_ident("help") {
                &mut args.help
            } else {
                return Err(syn::Error::new_spanned(&pair.path, "expected `message`, `labels` or `help`"));
            };

            if slot.replace(pair.value).is_some() {
                return Err(syn::Error::new_spanned(&pair.path, "duplicate tag"));
            }
        }

        Ok(args)
    }
}

/// A `let` statement that binds every named field of `self`, so the tag expressions can refer to
/// them. Unit structs need no bindings.
fn bind_fields(ident: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(fields) => {
            let names = fields.named.iter().map(|field| &field.ident);
            quote! { let #ident { #(#names),* } = self; }
        },
        Fields::Unnamed(_) => quote_spanned! {
            ident.span() => compile_error!("`ErrorKind` can only be derived for unit structs and structs with named fields");
        },
        Fields::Unit => TokenStream2::new(),
    }
}

/// A struct deriving `ErrorKind`.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,
    pub fields: Fields,
    pub error_args: ErrorArgs,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let attributes = input.call(Attribute::parse_outer)?;
        let item = input.parse::<ItemStruct>()?;

        let error_args = attributes.iter()
            .find(|attr| attr.path().is_ident("error"))
            .map(ErrorArgs::from_attribute)
            .transpose()?
            .unwrap_or_default();

        Ok(Self { name: item.ident, fields: item.fields, error_args })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let bindings = bind_fields(&self.name, &self.fields);
        let message = self.error_args.message.as_ref()
            .map_or_else(|| quote! { String::from("an error occurred") }, |e| quote! { (#e).to_string() });
        let labels = self.error_args.labels.as_ref()
            .map_or_else(
                || quote! { Vec::<String>::new() },
                |e| quote! { (#e).into_iter().map(|label| label.to_string()).collect::<Vec<String>>() },
            );
        let help = self.error_args.help.as_ref().map(|e| quote! { builder.set_help(#e); });

        tokens.extend(quote! {
            #[allow(unused_variables)]
            fn message(&self) -> String {
                #bindings
                #message
            }

            #[allow(unused_variables, unused_mut)]
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #bindings

                // labels pair up with spans in order; extra spans are highlighted without text
                let labels: Vec<String> = #labels;
                let texts = labels.into_iter().map(Some).chain(std::iter::repeat(None));
                let offset = spans.first().map_or(0, |span| span.start);

                let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                    .with_message(algebrist_error::ErrorKind::message(self));
                for (span, text) in spans.iter().zip(texts) {
                    let label = ariadne::Label::new((src_id, span.clone()))
                        .with_color(algebrist_error::EXPR);
                    builder.add_label(match text {
                        Some(text) if !text.is_empty() => label.with_message(text),
                        _ => label,
                    });
                }

                #help
                builder.finish()
            }
        });
    }
}
