use proc_macro2::{Span, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Fields, Ident};

/// Resolves the path to `hexfield_lib`, even when the crate has been renamed by the caller.
fn lib_path() -> TokenStream {
    match crate_name("hexfield_lib") {
        Ok(FoundCrate::Itself) => quote!(crate),
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        // Fall back to the canonical name and let the compiler report a missing crate
        Err(_) => quote!(::hexfield_lib),
    }
}

pub(crate) fn iterable_enum_inner(ast: &DeriveInput) -> TokenStream {
    let enum_name = &ast.ident;
    let (impl_generics, type_generics, where_clause) = ast.generics.split_for_impl();

    let variants = match &ast.data {
        Data::Enum(DataEnum { variants, .. }) => variants,
        _ => {
            return syn::Error::new_spanned(ast, "IterableEnum can only be derived for enums")
                .to_compile_error()
        }
    };

    let mut get_at_arms = Vec::with_capacity(variants.len());
    let mut index_arms = Vec::with_capacity(variants.len());

    for (index, variant) in variants.iter().enumerate() {
        let variant_ident = &variant.ident;

        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new_spanned(
                variant,
                "IterableEnum can only be derived for enums whose variants have no fields",
            )
            .to_compile_error();
        }

        get_at_arms.push(quote! {
            #index => Some(#enum_name::#variant_ident),
        });
        index_arms.push(quote! {
            #enum_name::#variant_ident => #index,
        });
    }

    let n_variants = variants.len();
    let lib = lib_path();

    quote! {
        impl #impl_generics #lib::enum_iter::IterableEnum for #enum_name #type_generics #where_clause {
            const N_VARIANTS: usize = #n_variants;

            fn get_at(index: usize) -> Option<Self> {
                match index {
                    #(#get_at_arms)*
                    _ => None,
                }
            }

            fn index(&self) -> usize {
                match self {
                    #(#index_arms)*
                }
            }
        }
    }
}
