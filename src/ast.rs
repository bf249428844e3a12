use crate::expr::*;
use crate::literal::Literal;
use crate::stmt::*;

/// Returns a string representation of the expression in parenthesized form.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$x.accept($self);
            )*
            string += ")";

            string
        }
    };
}

/// A debugging aid that renders an AST back into a fully-parenthesized
/// textual form, disambiguating precedence the way the original source
/// can't. Not part of the observable behavior of any pipeline stage; useful
/// when eyeballing what the parser actually built.
pub struct ASTPrinter;

impl ASTPrinter {
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }
}

impl ExprVisitor<String> for ASTPrinter {
    fn visit_literal_expr(&mut self, literal: &Literal) -> String {
        literal.to_string()
    }

    fn visit_logical_expr(&mut self, data: &LogicalData) -> String {
        parenthesize!(self, &data.operator.lexeme, &data.left, &data.right)
    }

    fn visit_unary_expr(&mut self, data: &UnaryData) -> String {
        parenthesize!(self, &data.operator.lexeme, &data.expr)
    }

    fn visit_binary_expr(&mut self, data: &BinaryData) -> String {
        parenthesize!(self, &data.operator.lexeme, &data.left, &data.right)
    }

    fn visit_grouping_expr(&mut self, data: &GroupingData) -> String {
        parenthesize!(self, "group", data.expr)
    }

    fn visit_variable_expr(&mut self, data: &VariableData) -> String {
        data.name.lexeme.clone()
    }

    fn visit_assign_expr(&mut self, data: &AssignData) -> String {
        parenthesize!(self, format!("= {}", data.name.lexeme).as_str(), data.value)
    }

    fn visit_call_expr(&mut self, data: &CallData) -> String {
        let mut string = data.callee.accept(self);
        string += "(";
        for (i, arg) in data.arguments.iter().enumerate() {
            if i > 0 {
                string += " ";
            }
            string += &arg.accept(self);
        }
        string += ")";
        string
    }

    fn visit_get_expr(&mut self, data: &GetData) -> String {
        format!("(. {} {})", data.object.accept(self), data.name.lexeme)
    }

    fn visit_set_expr(&mut self, data: &SetData) -> String {
        format!("(= (. {} {}) {})", data.object.accept(self), data.name.lexeme, data.value.accept(self))
    }

    fn visit_this_expr(&mut self, _data: &ThisData) -> String {
        "this".to_string()
    }

    fn visit_super_expr(&mut self, data: &SuperData) -> String {
        format!("(. super {})", data.method.lexeme)
    }
}

impl StmtVisitor<String> for ASTPrinter {
    fn visit_expression_stmt(&mut self, data: &ExpressionData) -> String {
        parenthesize!(self, "expr", data.expr)
    }

    fn visit_function_stmt(&mut self, data: &FunctionData) -> String {
        let mut string = format!("(fun {}(", data.name.lexeme);
        for (i, param) in data.params.iter().enumerate() {
            if i > 0 {
                string += " ";
            }
            string += &param.lexeme;
        }
        string += ") { ";
        string += &data.body.iter().map(|stmt| stmt.accept(self)).collect::<Vec<String>>().join(" ");
        string += " })";
        string
    }

    fn visit_if_stmt(&mut self, data: &IfData) -> String {
        let mut string = format!("(if {} {}", data.condition.accept(self), data.then_branch.accept(self));
        if let Some(else_branch) = &data.else_branch {
            string += " else ";
            string += &else_branch.accept(self);
        }
        string += ")";
        string
    }

    fn visit_print_stmt(&mut self, data: &PrintData) -> String {
        parenthesize!(self, "print", data.expr)
    }

    fn visit_var_stmt(&mut self, data: &VarData) -> String {
        let mut string = format!("(var {}", data.name.lexeme);
        if let Some(initializer) = &data.initializer {
            string += " = ";
            string += &initializer.accept(self);
        }
        string += ")";
        string
    }

    fn visit_while_stmt(&mut self, data: &WhileData) -> String {
        parenthesize!(self, "while", data.condition, data.body)
    }

    fn visit_break_stmt(&mut self, _data: &BreakData) -> String {
        "(break)".to_string()
    }

    fn visit_return_stmt(&mut self, data: &ReturnData) -> String {
        match &data.value {
            Some(value) => parenthesize!(self, "return", value),
            None => "(return)".to_string(),
        }
    }

    fn visit_block_stmt(&mut self, data: &BlockData) -> String {
        let mut string = "{".to_string();
        for stmt in &data.statements {
            string += " ";
            string += &stmt.accept(self);
        }
        string += " }";
        string
    }

    fn visit_class_stmt(&mut self, data: &ClassData) -> String {
        let mut string = format!("(class {}", data.name.lexeme);
        if let Some(superclass) = &data.superclass {
            string += " < ";
            string += &superclass.accept(self);
        }
        for method in &data.methods {
            string += " ";
            string += &method.accept(self);
        }
        string += ")";
        string
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    #[test]
    fn prints_precedence_explicitly() {
        let (tokens, _) = Scanner::new("-1 + 2 * 3").scan_tokens();
        let (statements, errors) = Parser::new(tokens).parse();
        assert!(errors.is_empty());

        let Stmt::Expression(data) = &statements[0] else { panic!("expected an expression statement") };
        assert_eq!(ASTPrinter.print(&data.expr), "(+ (- 1) (* 2 3))");
    }
}
