use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, DeriveInput};

/// Implements `EntityState` for a struct whose fields are components.
///
/// Every type parameter of the struct is required to be a `Component`.
#[proc_macro_derive(EntityState)]
pub fn derive_entity_state_fn(input: TokenStream) -> TokenStream {
    let main_crate = quote!(::archetype_store);

    let DeriveInput {
        ident,
        data,
        mut generics,
        ..
    } = parse_macro_input!(input as DeriveInput);

    let fields = if let syn::Data::Struct(data) = data {
        data.fields
    } else {
        return syn::Error::new(ident.span(), "EntityState can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let infos = fields.iter().enumerate().map(|(i, field)| {
        let field_ty = &field.ty;

        let offset = if let Some(field_ident) = &field.ident {
            quote! {
                #main_crate::private::offset_of!(Self, #field_ident)
            }
        } else {
            let i = syn::Index::from(i);
            quote! {
                #main_crate::private::offset_of!(Self, #i)
            }
        };

        quote! {
            #main_crate::private::ComponentInfo::of::<#field_ty>(#offset),
        }
    });

    let mut info_list = proc_macro2::TokenStream::new();
    info_list.extend(infos);

    let type_params: Vec<_> = generics.type_params().map(|param| param.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for param in type_params {
        where_clause
            .predicates
            .push(parse_quote!(#param: #main_crate::Component));
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        unsafe impl #impl_generics #main_crate::EntityState for #ident #ty_generics #where_clause {
            fn component_infos() -> #main_crate::private::ComponentInfos {
                #main_crate::private::smallvec![#info_list]
            }
        }
    }
    .into()
}
