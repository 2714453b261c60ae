// crates/unitsynth-gen/src/qualify.rs
//! Printable type references as seen from the generated test file, which
//! lives in the root package. Names declared elsewhere get their package
//! qualifier.

use unitsynth_syntax::types::is_predeclared;
use unitsynth_syntax::{
    ArrayLen, Field, FuncSyntax, InterfaceElem, InterfaceElemSyntax, ParamSyntax, Signature,
    SymbolResolver, TypeExpr, TypeId, TypeSyntax,
};

/// Reference to the type `name` declared at `at`.
pub fn type_name<R: SymbolResolver>(resolver: &R, name: &str, at: R::Handle) -> TypeSyntax {
    if is_predeclared(name) || resolver.is_root_package(at) {
        TypeSyntax::name(name)
    } else {
        TypeSyntax::Qualified {
            package: resolver.package_name_for(at).to_string(),
            name: name.to_string(),
        }
    }
}

pub fn type_syntax<R: SymbolResolver>(resolver: &R, ty: TypeId, at: R::Handle) -> TypeSyntax {
    let arena = resolver.arena();
    let boxed = |ty| Box::new(type_syntax(resolver, ty, at));
    match arena.get(ty) {
        TypeExpr::Ident(name) => type_name(resolver, name, at),
        TypeExpr::Named(decl) => type_name(resolver, &arena.decl(*decl).name, at),
        TypeExpr::Qualified { package, name } => TypeSyntax::Qualified {
            package: package.clone(),
            name: name.clone(),
        },
        TypeExpr::Pointer(elem) => TypeSyntax::Pointer(boxed(*elem)),
        TypeExpr::Array { len, elem } => TypeSyntax::Array {
            len: match len {
                ArrayLen::Slice => None,
                ArrayLen::Fixed(n) => Some(n.to_string()),
                ArrayLen::Const(name) => Some(type_name(resolver, name, at).to_string()),
            },
            elem: boxed(*elem),
        },
        TypeExpr::Map { key, value } => TypeSyntax::Map {
            key: boxed(*key),
            value: boxed(*value),
        },
        TypeExpr::Chan { dir, elem } => TypeSyntax::Chan {
            dir: *dir,
            elem: boxed(*elem),
        },
        TypeExpr::Func(sig) => TypeSyntax::Func(func_syntax(resolver, sig, at)),
        TypeExpr::Interface(iface) => TypeSyntax::Interface(
            iface
                .elems
                .iter()
                .map(|elem| match elem {
                    InterfaceElem::Method { name, sig } => InterfaceElemSyntax::Method {
                        name: name.clone(),
                        sig: func_syntax(resolver, sig, at),
                    },
                    InterfaceElem::Embedded(ty) => {
                        InterfaceElemSyntax::Embedded(type_syntax(resolver, *ty, at))
                    }
                })
                .collect(),
        ),
        TypeExpr::Struct(st) => TypeSyntax::Struct(
            st.fields
                .iter()
                .map(|field| ParamSyntax {
                    names: field.names.to_vec(),
                    ty: type_syntax(resolver, field.ty, at),
                })
                .collect(),
        ),
        TypeExpr::Variadic(elem) => TypeSyntax::Variadic(boxed(*elem)),
    }
}

pub fn func_syntax<R: SymbolResolver>(resolver: &R, sig: &Signature, at: R::Handle) -> FuncSyntax {
    let params = |fields: &[Field]| -> Vec<ParamSyntax> {
        fields
            .iter()
            .map(|field| ParamSyntax {
                names: field.names.to_vec(),
                ty: type_syntax(resolver, field.ty, at),
            })
            .collect()
    };
    FuncSyntax {
        params: params(&sig.params),
        results: params(&sig.results),
    }
}
