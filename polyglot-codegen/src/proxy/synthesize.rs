//! Proxy synthesis over function nodes.

use polyglot_core::sanitize_symbol;
use polyglot_ir::{Ast, FunctionNode, TypeProxy, VariableNode};

use super::policy::{Position, ProxyPolicy};

/// Linkage name of the proxy for a function with the given mangled name.
///
/// The mangled name is unique per overload, so the proxy symbol is too.
pub fn proxy_symbol(mangled_name: &str) -> String {
    format!("polyglot_proxy_{}", sanitize_symbol(mangled_name))
}

/// Linkage name of the function that releases strings returned by a
/// module's proxies.
pub fn free_string_symbol(module_name: &str) -> String {
    format!("polyglot_{}_free_string", sanitize_symbol(module_name))
}

/// Build the proxy descriptor for a function, if any value needs one.
///
/// The proxy copies the original signature and replaces every triggering
/// parameter and the return type with the policy's raw representation.
pub fn synthesize(f: &FunctionNode, policy: &dyn ProxyPolicy) -> Option<TypeProxy> {
    let is_return_proxied = policy.needs_proxy(&f.return_type);
    let proxied_parameters: Vec<String> = f
        .parameters
        .iter()
        .filter(|p| policy.needs_proxy(&p.ty))
        .map(|p| p.name.clone())
        .collect();

    if !is_return_proxied && proxied_parameters.is_empty() {
        return None;
    }

    let symbol = proxy_symbol(&f.mangled_name);
    let return_type = if is_return_proxied {
        policy.raw_type(&f.return_type, Position::Return)
    } else {
        f.return_type.clone()
    };
    let mut proxy = FunctionNode::new(symbol.clone(), symbol, return_type).with_flags(f.flags);
    proxy.parameters = f
        .parameters
        .iter()
        .map(|p| {
            if policy.needs_proxy(&p.ty) {
                VariableNode {
                    name: p.name.clone(),
                    ty: policy.raw_type(&p.ty, Position::Parameter),
                    value: None,
                }
            } else {
                p.clone()
            }
        })
        .collect();

    Some(TypeProxy {
        is_return_proxied,
        proxied_parameters,
        proxy: Box::new(proxy),
    })
}

/// Attach proxies to every free function of a module that needs one.
///
/// Returns the number of proxies synthesized. Functions that already carry
/// a proxy are left as they are.
pub fn apply_proxies(ast: &mut Ast, policy: &dyn ProxyPolicy) -> usize {
    let mut count = 0;
    ast.for_each_function_mut(&mut |f: &mut FunctionNode| {
        if f.type_proxy.is_some() {
            return;
        }
        if let Some(proxy) = synthesize(f, policy) {
            f.type_proxy = Some(proxy);
            count += 1;
        }
    });
    count
}
